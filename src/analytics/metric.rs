//! Named statistics and grouping keys.
//!
//! A `Metric` carries its computation, display label and unit together so
//! callers never infer formatting from a column name.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::analytics::stats;
use crate::models::Observation;

/// Display unit of a metric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    /// A rate, printed with a `%` suffix
    Percent,
    /// A spread in percentage points, printed with a ` pts` suffix
    Points,
}

impl Unit {
    /// Suffix appended to formatted values
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Points => " pts",
        }
    }

    /// Format `value` with two decimals and the unit suffix
    #[must_use]
    pub fn format(self, value: f64) -> String {
        format!("{value:.2}{}", self.suffix())
    }
}

/// Statistic applied to a group of values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Mean,
    Median,
    Volatility,
    Max,
    Min,
}

impl Metric {
    pub const ALL: [Self; 5] = [Self::Mean, Self::Median, Self::Volatility, Self::Max, Self::Min];

    /// Evaluate the metric, `None` when undefined for `values`
    #[must_use]
    pub fn compute(self, values: &[f64]) -> Option<f64> {
        match self {
            Self::Mean => stats::mean(values),
            Self::Median => stats::median(values),
            Self::Volatility => stats::sample_std(values),
            Self::Max => stats::max(values),
            Self::Min => stats::min(values),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mean => "Average",
            Self::Median => "Median",
            Self::Volatility => "Volatility (σ)",
            Self::Max => "Peak",
            Self::Min => "Trough",
        }
    }

    #[must_use]
    pub const fn unit(self) -> Unit {
        match self {
            Self::Volatility => Unit::Points,
            _ => Unit::Percent,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dimension rows are grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupKey {
    Region,
    Year,
    Decade,
    Era,
    Country,
}

impl GroupKey {
    /// Group label of `row` under this key
    #[must_use]
    pub fn label_of(self, row: &Observation) -> String {
        match self {
            Self::Region => row.region.label().to_string(),
            Self::Year => row.year.to_string(),
            Self::Decade => format!("{}s", row.decade),
            Self::Era => row.era.label().to_string(),
            Self::Country => row.area_label.clone(),
        }
    }
}

/// One group's metric value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupValue {
    pub group: String,
    pub value: f64,
    pub count: usize,
}

/// Evaluate `metric` per group of `key`, highest value first
///
/// Groups where the metric is undefined are omitted.
#[must_use]
pub fn group_aggregate(rows: &[Observation], key: GroupKey, metric: Metric) -> Vec<GroupValue> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in rows {
        groups.entry(key.label_of(row)).or_default().push(row.value);
    }

    let mut values: Vec<GroupValue> = groups
        .into_iter()
        .filter_map(|(group, values)| {
            Some(GroupValue {
                value: metric.compute(&values)?,
                count: values.len(),
                group,
            })
        })
        .collect();
    values.sort_by(|a, b| b.value.total_cmp(&a.value));
    values
}
