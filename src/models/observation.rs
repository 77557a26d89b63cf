//! Enriched observation model and the table that owns them.

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::models::types::{Era, Region};

/// One country-month inflation observation with its derived dimensions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Uppercase reference area code
    pub area_code: String,
    /// Display name of the reference area
    pub area_label: String,
    /// First day of the observed month
    pub period: NaiveDate,
    /// Inflation in percent
    pub value: f64,
    /// Region of `area_code`
    pub region: Region,
    /// Calendar year of `period`
    pub year: i32,
    /// Calendar month of `period` (1-12)
    pub month: u32,
    /// Calendar quarter of `period` (1-4)
    pub quarter: u32,
    /// Decade of `period`, e.g. 2010
    pub decade: i32,
    /// Historical era of `period`
    pub era: Era,
}

/// The enriched table, sorted by (`area_code`, `period`)
///
/// Produced once per pipeline run and read-only afterwards; analytics take
/// `rows()` as an immutable slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Build a table, restoring the (`area_code`, `period`) order
    #[must_use]
    pub fn new(mut rows: Vec<Observation>) -> Self {
        rows.sort_by(|a, b| {
            a.area_code
                .cmp(&b.area_code)
                .then_with(|| a.period.cmp(&b.period))
        });
        Self { rows }
    }

    /// All rows in table order
    #[must_use]
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Consume the table and return its rows
    #[must_use]
    pub fn into_rows(self) -> Vec<Observation> {
        self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest period present
    #[must_use]
    pub fn earliest_period(&self) -> Option<NaiveDate> {
        self.rows.iter().map(|row| row.period).min()
    }

    /// Latest period present
    #[must_use]
    pub fn latest_period(&self) -> Option<NaiveDate> {
        self.rows.iter().map(|row| row.period).max()
    }

    /// Number of distinct area codes
    #[must_use]
    pub fn country_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.area_code.as_str())
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Number of distinct months
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.period)
            .collect::<FxHashSet<_>>()
            .len()
    }
}

impl From<Vec<Observation>> for ObservationTable {
    fn from(rows: Vec<Observation>) -> Self {
        Self::new(rows)
    }
}
