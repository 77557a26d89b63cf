//! Cross-country distribution of values at a period and over time.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::stats;
use crate::config::AnalyticsConfig;
use crate::models::Observation;

/// Percentiles and moments of one period slice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    /// Rows in the slice
    pub count: usize,
    /// 10th percentile
    pub p10: f64,
    /// 25th percentile
    pub p25: f64,
    /// Median
    pub median: f64,
    /// 75th percentile
    pub p75: f64,
    /// 90th percentile
    pub p90: f64,
    /// Mean
    pub mean: f64,
    /// Sample standard deviation, `None` for a single row
    pub std: Option<f64>,
}

/// Summarise the values observed at `period`; `None` when nothing was observed
#[must_use]
pub fn summarize_distribution(rows: &[Observation], period: NaiveDate) -> Option<DistributionSummary> {
    let values: Vec<f64> = rows
        .iter()
        .filter(|row| row.period == period)
        .map(|row| row.value)
        .collect();
    let sorted = stats::sorted(&values);

    Some(DistributionSummary {
        count: values.len(),
        p10: stats::quantile_sorted(&sorted, 0.10)?,
        p25: stats::quantile_sorted(&sorted, 0.25)?,
        median: stats::quantile_sorted(&sorted, 0.50)?,
        p75: stats::quantile_sorted(&sorted, 0.75)?,
        p90: stats::quantile_sorted(&sorted, 0.90)?,
        mean: stats::mean(&values)?,
        std: stats::sample_std(&values),
    })
}

/// Percentile band at one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadPoint {
    /// Period
    pub period: NaiveDate,
    /// 10th percentile
    pub p10: f64,
    /// 25th percentile
    pub p25: f64,
    /// Median
    pub median: f64,
    /// 75th percentile
    pub p75: f64,
    /// 90th percentile
    pub p90: f64,
}

impl SpreadPoint {
    /// Width of the p10-p90 band
    #[must_use]
    pub fn band_width(&self) -> f64 {
        self.p90 - self.p10
    }
}

/// Percentile band per period, ascending
///
/// With `smoothing_window > 1` each percentile is replaced by its trailing
/// mean over that many periods.
#[must_use]
pub fn percentile_spread(rows: &[Observation], config: &AnalyticsConfig) -> Vec<SpreadPoint> {
    let mut by_period: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for row in rows {
        by_period.entry(row.period).or_default().push(row.value);
    }

    let mut bands: Vec<(NaiveDate, [f64; 5])> = Vec::with_capacity(by_period.len());
    for (period, values) in by_period {
        let sorted = stats::sorted(&values);
        let mut band = [0.0; 5];
        for (slot, q) in band.iter_mut().zip([0.10, 0.25, 0.50, 0.75, 0.90]) {
            // slice is never empty here
            *slot = stats::quantile_sorted(&sorted, q).unwrap_or_default();
        }
        bands.push((period, band));
    }

    if config.smoothing_window > 1 {
        for column in 0..5 {
            let series: Vec<f64> = bands.iter().map(|(_, band)| band[column]).collect();
            let smoothed = stats::rolling(&series, config.smoothing_window, 1, stats::mean);
            for ((_, band), value) in bands.iter_mut().zip(smoothed) {
                if let Some(value) = value {
                    band[column] = value;
                }
            }
        }
    }

    bands
        .into_iter()
        .map(|(period, [p10, p25, median, p75, p90])| SpreadPoint {
            period,
            p10,
            p25,
            median,
            p75,
            p90,
        })
        .collect()
}

/// Mean p10-p90 band width, `None` for an empty spread
#[must_use]
pub fn mean_band_width(spread: &[SpreadPoint]) -> Option<f64> {
    let widths: Vec<f64> = spread.iter().map(SpreadPoint::band_width).collect();
    stats::mean(&widths)
}
