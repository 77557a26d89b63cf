//! Cross-country time series: global average, per-country trends and dataset coverage.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::analytics::filter::latest_period;
use crate::analytics::stats;
use crate::analytics::volatility::by_country;
use crate::config::AnalyticsConfig;
use crate::models::Observation;

/// Countries preselected for multi-series comparison
pub const FOCUS_COUNT: usize = 5;

/// Global mean at one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub period: NaiveDate,
    /// Mean across all countries observed at the period
    pub mean: f64,
    /// Trailing mean of `mean` over `timeline_window` periods
    pub rolling: Option<f64>,
}

/// Mean per period with its trailing rolling mean, periods ascending
#[must_use]
pub fn global_timeline(rows: &[Observation], config: &AnalyticsConfig) -> Vec<TimelinePoint> {
    let mut sums: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry(row.period).or_default();
        entry.0 += row.value;
        entry.1 += 1;
    }

    let (periods, means): (Vec<NaiveDate>, Vec<f64>) = sums
        .into_iter()
        .map(|(period, (sum, count))| (period, sum / count as f64))
        .unzip();
    let rolled = stats::rolling(
        &means,
        config.timeline_window,
        config.timeline_min_periods,
        stats::mean,
    );

    periods
        .into_iter()
        .zip(means)
        .zip(rolled)
        .map(|((period, mean), rolling)| TimelinePoint { period, mean, rolling })
        .collect()
}

/// One country's (optionally smoothed or indexed) value at a period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub country: String,
    pub period: NaiveDate,
    pub value: f64,
}

/// Per-country series, smoothed with a trailing mean of `smoothing_window`
///
/// With `indexed`, each series is rebased so its first value is 100; a series
/// starting at 0 reads 100 throughout.
#[must_use]
pub fn trend_series(rows: &[Observation], config: &AnalyticsConfig, indexed: bool) -> Vec<TrendPoint> {
    let mut points = Vec::with_capacity(rows.len());

    for (country, group) in by_country(rows) {
        let values: Vec<f64> = group.iter().map(|row| row.value).collect();
        let mut series: Vec<f64> = if config.smoothing_window > 1 {
            stats::rolling(&values, config.smoothing_window, 1, stats::mean)
                .into_iter()
                .zip(&values)
                .map(|(smoothed, raw)| smoothed.unwrap_or(*raw))
                .collect()
        } else {
            values
        };

        if indexed {
            let base = series.first().copied().unwrap_or_default();
            for value in &mut series {
                *value = if base == 0.0 { 100.0 } else { *value / base * 100.0 };
            }
        }

        points.extend(group.iter().zip(series).map(|(row, value)| TrendPoint {
            country: country.to_string(),
            period: row.period,
            value,
        }));
    }

    points
}

/// Up to `FOCUS_COUNT` country labels with the highest value at the latest period
#[must_use]
pub fn focus_countries(rows: &[Observation]) -> Vec<String> {
    let Some(latest) = latest_period(rows) else {
        return Vec::new();
    };

    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.period == latest) {
        let entry = sums.entry(row.area_label.as_str()).or_default();
        entry.0 += row.value;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(country, (sum, count))| (country, sum / count as f64))
        .sorted_by(|a, b| b.1.total_cmp(&a.1))
        .take(FOCUS_COUNT)
        .map(|(country, _)| country.to_string())
        .collect()
}

/// Headline coverage figures of a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub observations: usize,
    /// Distinct area codes
    pub countries: usize,
    pub first_period: NaiveDate,
    pub last_period: NaiveDate,
    pub mean: f64,
    pub std: Option<f64>,
}

impl DatasetOverview {
    /// Calendar years covered, inclusive
    #[must_use]
    pub fn span_years(&self) -> i32 {
        self.last_period.year() - self.first_period.year() + 1
    }
}

/// Coverage of `rows`, `None` when empty
#[must_use]
pub fn dataset_overview(rows: &[Observation]) -> Option<DatasetOverview> {
    let values: Vec<f64> = rows.iter().map(|row| row.value).collect();
    let (first_period, last_period) = rows.iter().map(|row| row.period).minmax().into_option()?;
    let countries: FxHashSet<&str> = rows.iter().map(|row| row.area_code.as_str()).collect();

    Some(DatasetOverview {
        observations: rows.len(),
        countries: countries.len(),
        first_period,
        last_period,
        mean: stats::mean(&values)?,
        std: stats::sample_std(&values),
    })
}
