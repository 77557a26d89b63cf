//! Row filters producing the subsets views aggregate over.

use chrono::NaiveDate;
use rustc_hash::FxHashSet;

use crate::models::{Era, Observation, Region};

/// Conjunction of optional row predicates; an empty filter keeps every row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFilter {
    /// Keep only these regions
    pub regions: Option<FxHashSet<Region>>,
    /// Keep only these eras
    pub eras: Option<FxHashSet<Era>>,
    /// Keep only these country labels
    pub countries: Option<FxHashSet<String>>,
    /// Keep labels containing this text, case-insensitively
    pub label_contains: Option<String>,
    /// Inclusive lower bound on the period
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound on the period
    pub end: Option<NaiveDate>,
}

impl DataFilter {
    /// A filter that keeps everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to regions
    #[must_use]
    pub fn with_regions(mut self, regions: impl IntoIterator<Item = Region>) -> Self {
        self.regions = Some(regions.into_iter().collect());
        self
    }

    /// Restrict to eras
    #[must_use]
    pub fn with_eras(mut self, eras: impl IntoIterator<Item = Era>) -> Self {
        self.eras = Some(eras.into_iter().collect());
        self
    }

    /// Restrict to country labels
    #[must_use]
    pub fn with_countries<S: Into<String>>(mut self, countries: impl IntoIterator<Item = S>) -> Self {
        self.countries = Some(countries.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to labels containing `text`
    #[must_use]
    pub fn with_label_search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.label_contains = (!text.is_empty()).then(|| text.to_lowercase());
        self
    }

    /// Restrict to an inclusive period range
    #[must_use]
    pub fn with_period_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Whether a row passes every predicate
    #[must_use]
    pub fn matches(&self, row: &Observation) -> bool {
        self.regions.as_ref().is_none_or(|set| set.contains(&row.region))
            && self.eras.as_ref().is_none_or(|set| set.contains(&row.era))
            && self
                .countries
                .as_ref()
                .is_none_or(|set| set.contains(&row.area_label))
            && self
                .label_contains
                .as_ref()
                .is_none_or(|text| row.area_label.to_lowercase().contains(text.as_str()))
            && self.start.is_none_or(|start| row.period >= start)
            && self.end.is_none_or(|end| row.period <= end)
    }

    /// Copy the matching rows, preserving order
    #[must_use]
    pub fn apply(&self, rows: &[Observation]) -> Vec<Observation> {
        rows.iter().filter(|row| self.matches(row)).cloned().collect()
    }
}

/// Rows observed in exactly `period`
#[must_use]
pub fn period_slice(rows: &[Observation], period: NaiveDate) -> Vec<&Observation> {
    rows.iter().filter(|row| row.period == period).collect()
}

/// Latest period present in `rows`
#[must_use]
pub fn latest_period(rows: &[Observation]) -> Option<NaiveDate> {
    rows.iter().map(|row| row.period).max()
}
