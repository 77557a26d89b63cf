//! Era and decade comparisons.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::analytics::metric::Metric;
use crate::analytics::stats;
use crate::config::AnalyticsConfig;
use crate::models::{Era, Observation};

fn by_era(rows: &[Observation]) -> BTreeMap<Era, Vec<&Observation>> {
    let mut groups: BTreeMap<Era, Vec<&Observation>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.era).or_default().push(row);
    }
    groups
}

fn values_of(group: &[&Observation]) -> Vec<f64> {
    group.iter().map(|row| row.value).collect()
}

/// Metric value of one era
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EraValue {
    pub era: Era,
    pub value: f64,
}

/// `metric` per era, highest first; eras without a defined value are omitted
#[must_use]
pub fn era_statistics(rows: &[Observation], metric: Metric) -> Vec<EraValue> {
    let mut values: Vec<EraValue> = by_era(rows)
        .into_iter()
        .filter_map(|(era, group)| {
            Some(EraValue {
                era,
                value: metric.compute(&values_of(&group))?,
            })
        })
        .collect();
    values.sort_by(|a, b| b.value.total_cmp(&a.value));
    values
}

/// Summary of one era with its extreme observations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EraBenchmark {
    pub era: Era,
    /// First observed period in the era
    pub first_period: NaiveDate,
    /// Last observed period in the era
    pub last_period: NaiveDate,
    pub mean: f64,
    pub median: f64,
    pub volatility: Option<f64>,
    /// Country holding the highest observation
    pub peak_country: String,
    pub peak: f64,
    /// Country holding the lowest observation
    pub trough_country: String,
    pub trough: f64,
}

impl EraBenchmark {
    /// Years covered, e.g. `2007 – 2013`
    #[must_use]
    pub fn span_label(&self) -> String {
        format!("{} – {}", self.first_period.format("%Y"), self.last_period.format("%Y"))
    }
}

/// Benchmarks per era, highest mean first
#[must_use]
pub fn era_benchmarks(rows: &[Observation]) -> Vec<EraBenchmark> {
    let mut benchmarks: Vec<EraBenchmark> = by_era(rows)
        .into_iter()
        .filter_map(|(era, group)| {
            let values = values_of(&group);
            let peak = group.iter().max_by(|a, b| a.value.total_cmp(&b.value))?;
            let trough = group.iter().min_by(|a, b| a.value.total_cmp(&b.value))?;
            let (first_period, last_period) = group
                .iter()
                .map(|row| row.period)
                .minmax()
                .into_option()?;

            Some(EraBenchmark {
                era,
                first_period,
                last_period,
                mean: stats::mean(&values)?,
                median: stats::median(&values)?,
                volatility: stats::sample_std(&values),
                peak_country: peak.area_label.clone(),
                peak: peak.value,
                trough_country: trough.area_label.clone(),
                trough: trough.value,
            })
        })
        .collect();
    benchmarks.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    benchmarks
}

/// Mean across countries at one period of an era
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EraTrajectoryPoint {
    pub era: Era,
    pub period: NaiveDate,
    pub mean: f64,
}

/// Cross-country mean per (era, period), eras in chronological order
#[must_use]
pub fn era_trajectories(rows: &[Observation]) -> Vec<EraTrajectoryPoint> {
    let mut sums: BTreeMap<(Era, NaiveDate), (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry((row.era, row.period)).or_default();
        entry.0 += row.value;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|((era, period), (sum, count))| EraTrajectoryPoint {
            era,
            period,
            mean: sum / count as f64,
        })
        .collect()
}

/// A country's rank within an era
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub era: Era,
    /// 1-based position
    pub rank: usize,
    pub country: String,
    pub mean: f64,
}

/// Top `leaderboard_size` countries by mean within each era
#[must_use]
pub fn era_leaderboard(rows: &[Observation], config: &AnalyticsConfig) -> Vec<LeaderboardEntry> {
    let mut sums: BTreeMap<Era, BTreeMap<&str, (f64, usize)>> = BTreeMap::new();
    for row in rows {
        let entry = sums
            .entry(row.era)
            .or_default()
            .entry(row.area_label.as_str())
            .or_default();
        entry.0 += row.value;
        entry.1 += 1;
    }

    sums.into_iter()
        .flat_map(|(era, countries)| {
            countries
                .into_iter()
                .map(|(country, (sum, count))| (country, sum / count as f64))
                .sorted_by(|a, b| b.1.total_cmp(&a.1))
                .take(config.leaderboard_size)
                .enumerate()
                .map(move |(i, (country, mean))| LeaderboardEntry {
                    era,
                    rank: i + 1,
                    country: country.to_string(),
                    mean,
                })
        })
        .collect()
}

/// Descriptive statistics of one decade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeSummary {
    /// First year of the decade, e.g. 2010
    pub decade: i32,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
    pub volatility: Option<f64>,
}

/// Statistics per decade in chronological order
#[must_use]
pub fn decade_summary(rows: &[Observation]) -> Vec<DecadeSummary> {
    let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.decade).or_default().push(row.value);
    }

    groups
        .into_iter()
        .filter_map(|(decade, values)| {
            Some(DecadeSummary {
                decade,
                mean: stats::mean(&values)?,
                median: stats::median(&values)?,
                max: stats::max(&values)?,
                min: stats::min(&values)?,
                volatility: stats::sample_std(&values),
            })
        })
        .collect()
}
