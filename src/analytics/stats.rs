//! Descriptive statistics over plain value slices.
//!
//! Conventions: the standard deviation is the sample deviation (n - 1) and
//! quantiles interpolate linearly between closest ranks. Every function
//! returns `None` instead of a fabricated value when the input is too small.

/// Arithmetic mean
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation, `None` below two values
#[must_use]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}

/// Quantile `q` in [0, 1] of an ascending slice
#[must_use]
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Quantile `q` in [0, 1] of an unordered slice
#[must_use]
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    quantile_sorted(&sorted(values), q)
}

/// Median
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Largest value
#[must_use]
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().max_by(f64::total_cmp)
}

/// Smallest value
#[must_use]
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().min_by(f64::total_cmp)
}

/// Ascending copy of `values`
#[must_use]
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Apply `statistic` over trailing windows of up to `window` values
///
/// The output is aligned with `values`; positions whose window holds fewer
/// than `min_periods` values (or where `statistic` is undefined) are `None`.
pub fn rolling<F>(values: &[f64], window: usize, min_periods: usize, statistic: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    if window == 0 {
        return vec![None; values.len()];
    }
    let min_periods = min_periods.max(1);

    (0..values.len())
        .map(|end| {
            let start = (end + 1).saturating_sub(window);
            let slice = &values[start..=end];
            if slice.len() >= min_periods {
                statistic(slice)
            } else {
                None
            }
        })
        .collect()
}

/// Min-max scale to [0, 1]
///
/// Missing inputs stay out of the min/max population and scale to 0. When all
/// present values are equal, every output is 0.
#[must_use]
pub fn min_max_normalize(values: &[Option<f64>]) -> Vec<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let (Some(low), Some(high)) = (min(&present), max(&present)) else {
        return vec![0.0; values.len()];
    };
    let span = high - low;

    values
        .iter()
        .map(|value| match value {
            Some(v) if span > 0.0 => ((v - low) / span).clamp(0.0, 1.0),
            _ => 0.0,
        })
        .collect()
}

/// Pearson correlation of paired values
///
/// `None` with fewer than two pairs or when either side has no variance.
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;

    let (mut covariance, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((covariance / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}
