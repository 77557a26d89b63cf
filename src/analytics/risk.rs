//! Composite risk score per country.
//!
//! Each country is profiled over its full history; mean, volatility and the
//! p05..p95 range are min-max scaled across the population and blended with
//! fixed weights.

use serde::Serialize;

use crate::analytics::stats;
use crate::analytics::volatility::by_country;
use crate::models::{Observation, Region};

/// Weight of the normalised mean
pub const MEAN_WEIGHT: f64 = 0.40;
/// Weight of the normalised volatility
pub const VOLATILITY_WEIGHT: f64 = 0.35;
/// Weight of the normalised p05..p95 range
pub const RANGE_WEIGHT: f64 = 0.25;

/// Risk profile of one country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskScore {
    /// Country label
    pub country: String,
    /// Region of the country's latest observation
    pub region: Region,
    /// Mean value over the full history
    pub mean: f64,
    /// Sample standard deviation, `None` for a single observation
    pub volatility: Option<f64>,
    /// 95th percentile
    pub p95: f64,
    /// 5th percentile
    pub p05: f64,
    /// `p95 - p05`
    pub range: f64,
    /// Mean scaled to [0, 1] across the population
    pub norm_mean: f64,
    /// Volatility scaled to [0, 1] across the population
    pub norm_volatility: f64,
    /// Range scaled to [0, 1] across the population
    pub norm_range: f64,
    /// Weighted blend of the three normalised components, in [0, 1]
    pub score: f64,
}

struct Profile<'a> {
    country: &'a str,
    region: Region,
    mean: f64,
    volatility: Option<f64>,
    p95: f64,
    p05: f64,
}

impl Profile<'_> {
    fn range(&self) -> f64 {
        self.p95 - self.p05
    }
}

/// Score every country in `rows`, highest score first
///
/// A metric on which all countries are equal contributes 0 for everyone.
#[must_use]
pub fn risk_scores(rows: &[Observation]) -> Vec<RiskScore> {
    let profiles: Vec<Profile<'_>> = by_country(rows)
        .into_iter()
        .filter_map(|(country, group)| {
            let values: Vec<f64> = group.iter().map(|row| row.value).collect();
            let sorted = stats::sorted(&values);
            Some(Profile {
                country,
                region: group.last()?.region,
                mean: stats::mean(&values)?,
                volatility: stats::sample_std(&values),
                p95: stats::quantile_sorted(&sorted, 0.95)?,
                p05: stats::quantile_sorted(&sorted, 0.05)?,
            })
        })
        .collect();

    let norm_mean = stats::min_max_normalize(&profiles.iter().map(|p| Some(p.mean)).collect::<Vec<_>>());
    let norm_volatility =
        stats::min_max_normalize(&profiles.iter().map(|p| p.volatility).collect::<Vec<_>>());
    let norm_range = stats::min_max_normalize(&profiles.iter().map(|p| Some(p.range())).collect::<Vec<_>>());

    let mut scores: Vec<RiskScore> = profiles
        .into_iter()
        .enumerate()
        .map(|(i, profile)| {
            let score = MEAN_WEIGHT * norm_mean[i]
                + VOLATILITY_WEIGHT * norm_volatility[i]
                + RANGE_WEIGHT * norm_range[i];
            RiskScore {
                country: profile.country.to_string(),
                region: profile.region,
                mean: profile.mean,
                volatility: profile.volatility,
                p95: profile.p95,
                p05: profile.p05,
                range: profile.range(),
                norm_mean: norm_mean[i],
                norm_volatility: norm_volatility[i],
                norm_range: norm_range[i],
                score,
            }
        })
        .collect();

    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}
