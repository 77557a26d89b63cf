//! Dimensional enrichment of cleaned records.
//!
//! Attaches the region, calendar fields and era to each cleaned row.

use chrono::{Datelike, NaiveDate};

use crate::ingest::CleanRecord;
use crate::models::{Era, Observation, ObservationTable};
use crate::region::RegionClassifier;

/// Calendar fields derived from a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    /// Calendar year
    pub year: i32,
    /// Month of year (1-12)
    pub month: u32,
    /// Quarter of year (1-4)
    pub quarter: u32,
    /// Year floored to its decade
    pub decade: i32,
}

impl CalendarFields {
    /// Derive the fields of a period
    #[must_use]
    pub fn of(period: NaiveDate) -> Self {
        let year = period.year();
        let month = period.month();
        Self {
            year,
            month,
            quarter: (month - 1) / 3 + 1,
            decade: year.div_euclid(10) * 10,
        }
    }
}

/// Enrich one cleaned record
#[must_use]
pub fn enrich_record(record: CleanRecord, classifier: &RegionClassifier) -> Observation {
    let calendar = CalendarFields::of(record.period);
    let region = classifier.classify(&record.area_code);

    Observation {
        region,
        year: calendar.year,
        month: calendar.month,
        quarter: calendar.quarter,
        decade: calendar.decade,
        era: Era::classify(record.period),
        area_code: record.area_code,
        area_label: record.area_label,
        period: record.period,
        value: record.value,
    }
}

/// Enrich a cleaned record set into the table handed to analytics
#[must_use]
pub fn enrich(records: Vec<CleanRecord>, classifier: &RegionClassifier) -> ObservationTable {
    ObservationTable::new(
        records
            .into_iter()
            .map(|record| enrich_record(record, classifier))
            .collect(),
    )
}
