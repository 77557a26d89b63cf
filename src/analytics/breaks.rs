//! Structural break detection.
//!
//! Compares each country's mean over the trailing window ending at a
//! reference period with its mean over the window of equal length before it.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::config::AnalyticsConfig;
use crate::models::Observation;

/// Shift between two adjacent windows for one country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakPoint {
    /// Country label
    pub country: String,
    /// Mean of the window ending at the reference period
    pub current_avg: f64,
    /// Mean of the window before it
    pub previous_avg: f64,
    /// `current_avg - previous_avg`
    pub shift: f64,
    /// Window length in months
    pub window: u32,
}

impl BreakPoint {
    /// Short label of the comparison, e.g. `Δ6m`
    #[must_use]
    pub fn period_label(&self) -> String {
        format!("Δ{}m", self.window)
    }
}

/// Detect shifts at `reference` using `break_window` months per window
///
/// The current window covers periods in `(reference - W, reference]`, the
/// previous one `(reference - 2W, reference - W]`. Countries missing from
/// either window are left out. Results are ordered by absolute shift,
/// largest first.
#[must_use]
pub fn detect_breaks(
    rows: &[Observation],
    reference: NaiveDate,
    config: &AnalyticsConfig,
) -> Vec<BreakPoint> {
    let window = config.break_window;
    let (Some(current_floor), Some(previous_floor)) = (
        reference.checked_sub_months(Months::new(window)),
        reference.checked_sub_months(Months::new(window.saturating_mul(2))),
    ) else {
        return Vec::new();
    };

    let mut current: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    let mut previous: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for row in rows {
        let bucket = if row.period <= reference && row.period > current_floor {
            &mut current
        } else if row.period <= current_floor && row.period > previous_floor {
            &mut previous
        } else {
            continue;
        };
        let entry = bucket.entry(row.area_label.as_str()).or_insert((0.0, 0));
        entry.0 += row.value;
        entry.1 += 1;
    }

    let mut breaks: Vec<BreakPoint> = current
        .into_iter()
        .filter_map(|(country, (current_sum, current_count))| {
            let (previous_sum, previous_count) = previous.get(country)?;
            let current_avg = current_sum / current_count as f64;
            let previous_avg = previous_sum / *previous_count as f64;
            Some(BreakPoint {
                country: country.to_string(),
                current_avg,
                previous_avg,
                shift: current_avg - previous_avg,
                window,
            })
        })
        .collect();

    breaks.sort_by(|a, b| b.shift.abs().total_cmp(&a.shift.abs()));
    breaks
}
