//! Anomaly radar: each country's latest value scored against its own recent history.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::analytics::stats;
use crate::models::{Observation, Region};

/// Trailing calendar months a country's latest value is compared against
pub const ANOMALY_LOOKBACK_MONTHS: u32 = 12;

/// Absolute z-score at which a latest value is flagged
pub const ANOMALY_Z_THRESHOLD: f64 = 2.0;

/// A latest observation far from its trailing mean
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    /// Country label
    pub country: String,
    /// Region of the latest observation
    pub region: Region,
    /// Value at the reference period
    pub value: f64,
    /// `(value - trailing mean) / trailing sample std`
    pub z_score: f64,
}

/// Flagged spikes and cool-downs at one reference period
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnomalyRadar {
    /// Countries with `z >= 2`, highest first
    pub hot: Vec<Anomaly>,
    /// Countries with `z <= -2`, lowest first
    pub cooling: Vec<Anomaly>,
}

impl AnomalyRadar {
    /// Whether nothing was flagged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hot.is_empty() && self.cooling.is_empty()
    }
}

/// Score every observation at `reference` against its country's trailing window
///
/// The window spans `reference - 12 months` through `reference` inclusive.
/// Countries with fewer than two values in the window, or with no variance,
/// have no defined score and are never flagged.
#[must_use]
pub fn anomaly_radar(rows: &[Observation], reference: NaiveDate) -> AnomalyRadar {
    let Some(start) = reference.checked_sub_months(Months::new(ANOMALY_LOOKBACK_MONTHS)) else {
        return AnomalyRadar::default();
    };

    let mut history: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.period >= start && row.period <= reference) {
        history.entry(row.area_label.as_str()).or_default().push(row.value);
    }
    let baselines: BTreeMap<&str, (f64, f64)> = history
        .into_iter()
        .filter_map(|(label, values)| {
            let std = stats::sample_std(&values).filter(|std| *std > 0.0)?;
            Some((label, (stats::mean(&values)?, std)))
        })
        .collect();

    let mut radar = AnomalyRadar::default();
    for row in rows.iter().filter(|row| row.period == reference) {
        let Some((mean, std)) = baselines.get(row.area_label.as_str()) else {
            continue;
        };
        let z_score = (row.value - mean) / std;
        let anomaly = Anomaly {
            country: row.area_label.clone(),
            region: row.region,
            value: row.value,
            z_score,
        };
        if z_score >= ANOMALY_Z_THRESHOLD {
            radar.hot.push(anomaly);
        } else if z_score <= -ANOMALY_Z_THRESHOLD {
            radar.cooling.push(anomaly);
        }
    }

    radar.hot.sort_by(|a, b| b.z_score.total_cmp(&a.z_score));
    radar.cooling.sort_by(|a, b| a.z_score.total_cmp(&b.z_score));
    radar
}
