//! Regional hotspot shares and threshold-based rankings.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::analytics::movers::mean_by_country;
use crate::analytics::stats;
use crate::analytics::volatility::by_country;
use crate::config::AnalyticsConfig;
use crate::models::{Observation, Region};

/// Hotspot counts for one region at one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalHotspot {
    /// Region
    pub region: Region,
    /// Distinct countries observed
    pub countries: usize,
    /// Distinct countries at or above the threshold
    pub hotspots: usize,
    /// `hotspots / countries` in percent, 0 for a region without countries
    pub share: f64,
}

/// Percentage of `hotspots` in `countries`, 0 when there are no countries
#[must_use]
pub fn share_percent(hotspots: usize, countries: usize) -> f64 {
    if countries == 0 {
        0.0
    } else {
        hotspots as f64 / countries as f64 * 100.0
    }
}

/// Per-region hotspot counts at `period` against `threshold`
///
/// Regions appear in display order; an empty slice yields an empty result.
#[must_use]
pub fn regional_hotspots(rows: &[Observation], period: NaiveDate, threshold: f64) -> Vec<RegionalHotspot> {
    let mut by_region: BTreeMap<Region, (FxHashSet<&str>, FxHashSet<&str>)> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.period == period) {
        let (countries, hotspots) = by_region.entry(row.region).or_default();
        countries.insert(&row.area_code);
        if row.value >= threshold {
            hotspots.insert(&row.area_code);
        }
    }

    by_region
        .into_iter()
        .map(|(region, (countries, hotspots))| RegionalHotspot {
            region,
            countries: countries.len(),
            hotspots: hotspots.len(),
            share: share_percent(hotspots.len(), countries.len()),
        })
        .collect()
}

/// Share of distinct countries at or above `threshold` within a slice, in percent
///
/// An empty slice yields 0.
#[must_use]
pub fn hotspot_share(rows: &[&Observation], threshold: f64) -> f64 {
    let countries: FxHashSet<&str> = rows.iter().map(|row| row.area_code.as_str()).collect();
    let hotspots: FxHashSet<&str> = rows
        .iter()
        .filter(|row| row.value >= threshold)
        .map(|row| row.area_code.as_str())
        .collect();
    share_percent(hotspots.len(), countries.len())
}

/// Mean value per region at `period`, highest first
#[must_use]
pub fn regional_averages(rows: &[Observation], period: NaiveDate) -> Vec<(Region, f64)> {
    let mut values: BTreeMap<Region, Vec<f64>> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.period == period) {
        values.entry(row.region).or_default().push(row.value);
    }

    let mut averages: Vec<(Region, f64)> = values
        .into_iter()
        .filter_map(|(region, values)| Some((region, stats::mean(&values)?)))
        .collect();
    averages.sort_by(|a, b| b.1.total_cmp(&a.1));
    averages
}

/// Fraction (0 to 1) of all rows per region at or above `threshold`, highest first
#[must_use]
pub fn threshold_share_by_region(rows: &[Observation], threshold: f64) -> Vec<(Region, f64)> {
    let mut counts: BTreeMap<Region, (usize, usize)> = BTreeMap::new();
    for row in rows {
        let entry = counts.entry(row.region).or_default();
        entry.0 += usize::from(row.value >= threshold);
        entry.1 += 1;
    }

    let mut shares: Vec<(Region, f64)> = counts
        .into_iter()
        .map(|(region, (above, total))| (region, above as f64 / total as f64))
        .collect();
    shares.sort_by(|a, b| b.1.total_cmp(&a.1));
    shares
}

/// Months at or above `threshold` per country, longest first, capped at `persistence_limit`
#[must_use]
pub fn persistence_ranking(
    rows: &[Observation],
    threshold: f64,
    config: &AnalyticsConfig,
) -> Vec<(String, usize)> {
    let mut months: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *months.entry(row.area_label.as_str()).or_default() += usize::from(row.value >= threshold);
    }

    let mut ranking: Vec<(String, usize)> = months
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1));
    ranking.truncate(config.persistence_limit);
    ranking
}

/// Long-run profile of one country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationRow {
    /// Country label
    pub country: String,
    /// Region of the country's latest observation
    pub region: Region,
    /// Mean value
    pub avg: f64,
    /// Median value
    pub median: f64,
    /// Sample standard deviation
    pub volatility: Option<f64>,
    /// Percent of months at or above the threshold
    pub share_above: f64,
}

/// Per-country concentration of months at or above `threshold`, highest share first
#[must_use]
pub fn concentration_table(rows: &[Observation], threshold: f64) -> Vec<ConcentrationRow> {
    let mut table: Vec<ConcentrationRow> = by_country(rows)
        .into_iter()
        .filter_map(|(label, group)| {
            let values: Vec<f64> = group.iter().map(|row| row.value).collect();
            let above = values.iter().filter(|v| **v >= threshold).count();
            Some(ConcentrationRow {
                country: label.to_string(),
                region: group.last()?.region,
                avg: stats::mean(&values)?,
                median: stats::median(&values)?,
                volatility: stats::sample_std(&values),
                share_above: share_percent(above, values.len()),
            })
        })
        .collect();

    table.sort_by(|a, b| b.share_above.total_cmp(&a.share_above));
    table
}

/// Headline indicators for a region (or any row subset) at one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionKpis {
    /// Reference period
    pub period: NaiveDate,
    /// Mean of the subset at `period`
    pub average: Option<f64>,
    /// `average` minus the mean of all rows at `period`
    pub vs_global: Option<f64>,
    /// `average` minus the subset mean one month earlier
    pub momentum: Option<f64>,
    /// Percent of the subset's countries at or above the hotspot threshold
    pub hotspot_share: Option<f64>,
    /// `hotspot_share` minus the same share one month earlier
    pub hotspot_share_change: Option<f64>,
    /// Sample std of the subset's monthly mean over the trailing 12 months
    pub volatility: Option<f64>,
}

/// KPIs for `region_rows` at `reference`, benchmarked against `global_rows`
///
/// Shares are `None` for a period where the subset has no rows, so a missing
/// month is not reported as a zero share.
#[must_use]
pub fn region_kpis(
    region_rows: &[Observation],
    global_rows: &[Observation],
    reference: NaiveDate,
    config: &AnalyticsConfig,
) -> RegionKpis {
    let values_at = |rows: &[Observation], period: NaiveDate| -> Vec<f64> {
        rows.iter().filter(|row| row.period == period).map(|row| row.value).collect()
    };
    let share_at = |period: NaiveDate| -> Option<f64> {
        let slice: Vec<&Observation> = region_rows.iter().filter(|row| row.period == period).collect();
        (!slice.is_empty()).then(|| hotspot_share(&slice, config.hotspot_threshold))
    };

    let average = stats::mean(&values_at(region_rows, reference));
    let global = stats::mean(&values_at(global_rows, reference));
    let previous_period = reference.checked_sub_months(Months::new(1));
    let previous = previous_period.and_then(|period| stats::mean(&values_at(region_rows, period)));

    let share = share_at(reference);
    let previous_share = previous_period.and_then(share_at);

    let volatility = reference
        .checked_sub_months(Months::new(12))
        .and_then(|start| {
            let mut monthly: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
            for row in region_rows.iter().filter(|row| row.period >= start && row.period <= reference) {
                monthly.entry(row.period).or_default().push(row.value);
            }
            let means: Vec<f64> = monthly.values().filter_map(|values| stats::mean(values)).collect();
            stats::sample_std(&means)
        });

    RegionKpis {
        period: reference,
        average,
        vs_global: average.zip(global).map(|(a, g)| a - g),
        momentum: average.zip(previous).map(|(a, p)| a - p),
        hotspot_share: share,
        hotspot_share_change: share.zip(previous_share).map(|(c, p)| c - p),
        volatility,
    }
}

/// One country line of the regional drill table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrillRow {
    /// Country label
    pub country: String,
    /// Region of the country at the reference period
    pub region: Region,
    /// Value at the reference period
    pub current: f64,
    /// Value one month earlier
    pub previous: Option<f64>,
    /// `current - previous`
    pub mom_change: Option<f64>,
    /// `current` minus the value twelve months earlier
    pub yoy_change: Option<f64>,
}

/// Every country observed at `reference` with its month-over-month and
/// year-over-year change, highest current value first
#[must_use]
pub fn region_drill_table(rows: &[Observation], reference: NaiveDate) -> Vec<DrillRow> {
    let lookup = |months: u32| {
        reference
            .checked_sub_months(Months::new(months))
            .map(|period| mean_by_country(rows, period))
            .unwrap_or_default()
    };
    let previous = lookup(1);
    let year_ago = lookup(12);

    let mut table: Vec<DrillRow> = mean_by_country(rows, reference)
        .into_iter()
        .map(|(country, (region, current))| {
            let prior = previous.get(country).map(|(_, value)| *value);
            DrillRow {
                country: country.to_string(),
                region,
                current,
                previous: prior,
                mom_change: prior.map(|value| current - value),
                yoy_change: year_ago.get(country).map(|(_, value)| current - value),
            }
        })
        .collect();

    table.sort_by(|a, b| b.current.total_cmp(&a.current));
    table
}
