//! Rolling volatility per country.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::stats;
use crate::config::AnalyticsConfig;
use crate::models::{Observation, Region};

/// Rolling standard deviation at one country-month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilityPoint {
    /// Country label
    pub area_label: String,
    /// Period the trailing window ends at
    pub period: NaiveDate,
    /// Standard deviation, `None` until the window holds enough observations
    pub volatility: Option<f64>,
}

/// Latest value and latest volatility of a country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilityProfile {
    /// Country label
    pub area_label: String,
    /// Region of the country
    pub region: Region,
    /// Value at the profile period
    pub value: f64,
    /// Most recent rolling volatility
    pub volatility: f64,
}

/// Group rows by country label, each group in period order
pub(crate) fn by_country(rows: &[Observation]) -> BTreeMap<&str, Vec<&Observation>> {
    let mut groups: BTreeMap<&str, Vec<&Observation>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.area_label.as_str()).or_default().push(row);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|row| row.period);
    }
    groups
}

/// Rolling standard deviation over the trailing `volatility_window` observations
///
/// Countries are ordered by label and periods ascending within each.
#[must_use]
pub fn rolling_volatility(rows: &[Observation], config: &AnalyticsConfig) -> Vec<VolatilityPoint> {
    let mut points = Vec::with_capacity(rows.len());

    for (label, group) in by_country(rows) {
        let values: Vec<f64> = group.iter().map(|row| row.value).collect();
        let rolled = stats::rolling(
            &values,
            config.volatility_window,
            config.volatility_min_periods,
            stats::sample_std,
        );
        points.extend(group.iter().zip(rolled).map(|(row, volatility)| VolatilityPoint {
            area_label: label.to_string(),
            period: row.period,
            volatility,
        }));
    }

    points
}

/// Rolling volatility at each country's last observation, countries without one omitted
#[must_use]
pub fn latest_volatility(rows: &[Observation], config: &AnalyticsConfig) -> BTreeMap<String, f64> {
    let mut latest = BTreeMap::new();
    for point in rolling_volatility(rows, config) {
        match point.volatility {
            Some(volatility) => {
                latest.insert(point.area_label, volatility);
            }
            None => {
                latest.remove(&point.area_label);
            }
        }
    }
    latest
}

/// Join each country's value at `period` with its latest volatility
///
/// Countries lacking either side are left out; sorted by value descending.
#[must_use]
pub fn level_vs_volatility(
    rows: &[Observation],
    period: NaiveDate,
    config: &AnalyticsConfig,
) -> Vec<VolatilityProfile> {
    let latest = latest_volatility(rows, config);

    let mut profiles: Vec<VolatilityProfile> = rows
        .iter()
        .filter(|row| row.period == period)
        .filter_map(|row| {
            latest.get(&row.area_label).map(|volatility| VolatilityProfile {
                area_label: row.area_label.clone(),
                region: row.region,
                value: row.value,
                volatility: *volatility,
            })
        })
        .collect();

    profiles.sort_by(|a, b| b.value.total_cmp(&a.value));
    profiles
}
