//! Extremes, short-term movers, alerts and policy indicators.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use itertools::Itertools;
use serde::Serialize;

use crate::analytics::filter::latest_period;
use crate::analytics::stats;
use crate::config::AnalyticsConfig;
use crate::models::{Observation, Region};

/// A single extreme observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordEntry {
    pub country: String,
    pub period: NaiveDate,
    pub value: f64,
    pub region: Region,
}

impl From<&Observation> for RecordEntry {
    fn from(row: &Observation) -> Self {
        Self {
            country: row.area_label.clone(),
            period: row.period,
            value: row.value,
            region: row.region,
        }
    }
}

/// Highest and lowest observations of a table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordBoard {
    /// Highest first
    pub highest: Vec<RecordEntry>,
    /// Lowest first
    pub lowest: Vec<RecordEntry>,
}

/// The `top_n` highest and lowest observations
#[must_use]
pub fn record_board(rows: &[Observation], config: &AnalyticsConfig) -> RecordBoard {
    let ascending: Vec<&Observation> = rows
        .iter()
        .sorted_by(|a, b| a.value.total_cmp(&b.value))
        .collect();

    RecordBoard {
        highest: ascending.iter().rev().take(config.top_n).map(|row| RecordEntry::from(*row)).collect(),
        lowest: ascending.iter().take(config.top_n).map(|row| RecordEntry::from(*row)).collect(),
    }
}

/// Change of one country between two consecutive months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mover {
    pub country: String,
    pub region: Region,
    pub previous: f64,
    pub current: f64,
    /// `current - previous`
    pub delta: f64,
}

/// Mean value per country label at `period`, with the region of its first row
pub(crate) fn mean_by_country(rows: &[Observation], period: NaiveDate) -> BTreeMap<&str, (Region, f64)> {
    let mut sums: BTreeMap<&str, (Region, f64, usize)> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.period == period) {
        let entry = sums
            .entry(row.area_label.as_str())
            .or_insert((row.region, 0.0, 0));
        entry.1 += row.value;
        entry.2 += 1;
    }
    sums.into_iter()
        .map(|(country, (region, sum, count))| (country, (region, sum / count as f64)))
        .collect()
}

fn latest_changes(rows: &[Observation]) -> Vec<Mover> {
    let Some(latest) = latest_period(rows) else {
        return Vec::new();
    };
    let Some(previous_period) = latest.checked_sub_months(Months::new(1)) else {
        return Vec::new();
    };

    let previous = mean_by_country(rows, previous_period);
    mean_by_country(rows, latest)
        .into_iter()
        .filter_map(|(country, (region, current))| {
            let (_, previous) = previous.get(country)?;
            Some(Mover {
                country: country.to_string(),
                region,
                previous: *previous,
                current,
                delta: current - previous,
            })
        })
        .collect()
}

/// Latest month against the calendar month before it, largest rise first
///
/// Empty when the previous month has no observations.
#[must_use]
pub fn month_over_month_movers(rows: &[Observation]) -> Vec<Mover> {
    let mut movers = latest_changes(rows);
    movers.sort_by(|a, b| b.delta.total_cmp(&a.delta));
    movers
}

/// Countries at the latest month breaching the level or the move threshold, highest value first
#[must_use]
pub fn alerts(rows: &[Observation], config: &AnalyticsConfig) -> Vec<Mover> {
    let mut breaches: Vec<Mover> = latest_changes(rows)
        .into_iter()
        .filter(|mover| {
            mover.current >= config.hotspot_threshold || mover.delta.abs() >= config.alert_sensitivity
        })
        .collect();
    breaches.sort_by(|a, b| b.current.total_cmp(&a.current));
    breaches
}

/// Stability indicators over a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyKpis {
    /// Percent of observations at or below `stability_threshold`
    pub stable_share: f64,
    /// Percent of observations at or above `severe_threshold`
    pub severe_share: f64,
    /// Mean year-over-year change of yearly means, `None` with fewer than two years
    pub annual_drift: Option<f64>,
}

/// Policy indicators, `None` for an empty table
#[must_use]
pub fn policy_kpis(rows: &[Observation], config: &AnalyticsConfig) -> Option<PolicyKpis> {
    if rows.is_empty() {
        return None;
    }
    let total = rows.len() as f64;
    let stable = rows.iter().filter(|row| row.value <= config.stability_threshold).count();
    let severe = rows.iter().filter(|row| row.value >= config.severe_threshold).count();

    let mut years: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for row in rows {
        years.entry(row.year).or_default().push(row.value);
    }
    let yearly: Vec<f64> = years.values().filter_map(|values| stats::mean(values)).collect();
    let diffs: Vec<f64> = yearly.iter().tuple_windows().map(|(a, b)| b - a).collect();

    Some(PolicyKpis {
        stable_share: stable as f64 / total * 100.0,
        severe_share: severe as f64 / total * 100.0,
        annual_drift: stats::mean(&diffs),
    })
}

/// Change of a country's yearly mean between the first and last year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearChange {
    pub country: String,
    pub start: f64,
    pub end: f64,
    pub change: f64,
}

/// Largest improvements and deteriorations between the first and last year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalMovers {
    pub first_year: i32,
    pub last_year: i32,
    /// Most negative change first
    pub improvers: Vec<YearChange>,
    /// Most positive change first
    pub deteriorations: Vec<YearChange>,
}

fn yearly_mean(rows: &[Observation], year: i32) -> BTreeMap<&str, f64> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.year == year) {
        let entry = sums.entry(row.area_label.as_str()).or_default();
        entry.0 += row.value;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(country, (sum, count))| (country, sum / count as f64))
        .collect()
}

/// Countries present in both the first and last year, `top_n` per side
#[must_use]
pub fn historical_movers(rows: &[Observation], config: &AnalyticsConfig) -> Option<HistoricalMovers> {
    let (first_year, last_year) = rows.iter().map(|row| row.year).minmax().into_option()?;
    let start = yearly_mean(rows, first_year);
    let end = yearly_mean(rows, last_year);

    let changes: Vec<YearChange> = start
        .into_iter()
        .filter_map(|(country, start)| {
            let end = *end.get(country)?;
            Some(YearChange {
                country: country.to_string(),
                start,
                end,
                change: end - start,
            })
        })
        .sorted_by(|a, b| a.change.total_cmp(&b.change))
        .collect();

    Some(HistoricalMovers {
        first_year,
        last_year,
        improvers: changes.iter().take(config.top_n).cloned().collect(),
        deteriorations: changes.iter().rev().take(config.top_n).cloned().collect(),
    })
}
