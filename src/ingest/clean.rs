//! Row-level cleaning of raw records.
//!
//! Identifiers are normalised and missing ones replaced by sentinels. Rows
//! whose period or value cannot be parsed are dropped without error, then
//! duplicates on (`area_code`, `period`) are collapsed keeping the last row
//! in stable (`area_code`, `period`) order.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::ingest::RawRecord;

/// Sentinel for a missing area code
pub const UNKNOWN_AREA_CODE: &str = "UNK";
/// Sentinel for a missing area label
pub const UNKNOWN_AREA_LABEL: &str = "Unknown Region";
/// The one accepted period format
pub const PERIOD_FORMAT: &str = "%Y-%m-%d";

/// A typed, validated row before enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    /// Trimmed, uppercase area code
    pub area_code: String,
    /// Trimmed area label
    pub area_label: String,
    /// First day of the observed month
    pub period: NaiveDate,
    /// Finite observation value
    pub value: f64,
}

/// Why rows were removed during cleaning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RejectionCounts {
    /// Rows whose period was missing or not in [`PERIOD_FORMAT`]
    pub invalid_period: usize,
    /// Rows whose value was missing, non-numeric or not finite
    pub invalid_value: usize,
    /// Rows superseded by a later row for the same area and month
    pub duplicates: usize,
}

impl RejectionCounts {
    /// Total rows removed
    #[must_use]
    pub const fn total(&self) -> usize {
        self.invalid_period + self.invalid_value + self.duplicates
    }
}

/// Result of cleaning a raw record set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningOutcome {
    /// Surviving rows sorted by (`area_code`, `period`)
    pub records: Vec<CleanRecord>,
    /// Breakdown of removed rows
    pub rejected: RejectionCounts,
}

/// Clean a raw record set
#[must_use]
pub fn clean_records<I>(raw: I) -> CleaningOutcome
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut rejected = RejectionCounts::default();

    let mut records: Vec<CleanRecord> = raw
        .into_iter()
        .filter_map(|record| clean_record(record, &mut rejected))
        .collect();

    // Stable, so rows sharing a key keep their input order.
    records.sort_by(|a, b| {
        a.area_code
            .cmp(&b.area_code)
            .then_with(|| a.period.cmp(&b.period))
    });

    let mut deduped: Vec<CleanRecord> = Vec::with_capacity(records.len());
    for record in records {
        match deduped.last_mut() {
            Some(last) if last.area_code == record.area_code && last.period == record.period => {
                *last = record;
                rejected.duplicates += 1;
            }
            _ => deduped.push(record),
        }
    }

    CleaningOutcome {
        records: deduped,
        rejected,
    }
}

fn clean_record(record: RawRecord, rejected: &mut RejectionCounts) -> Option<CleanRecord> {
    let Some(period) = record.period.as_deref().and_then(parse_period) else {
        rejected.invalid_period += 1;
        return None;
    };
    let Some(value) = record.value.as_deref().and_then(parse_value) else {
        rejected.invalid_value += 1;
        return None;
    };

    Some(CleanRecord {
        area_code: normalize_area_code(record.area_code.as_deref()),
        area_label: normalize_area_label(record.area_label.as_deref()),
        period,
        value,
    })
}

/// Trim and uppercase an area code, falling back to [`UNKNOWN_AREA_CODE`]
#[must_use]
pub fn normalize_area_code(code: Option<&str>) -> String {
    match code.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_uppercase(),
        _ => UNKNOWN_AREA_CODE.to_string(),
    }
}

/// Trim an area label, falling back to [`UNKNOWN_AREA_LABEL`]
#[must_use]
pub fn normalize_area_label(label: Option<&str>) -> String {
    match label.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => UNKNOWN_AREA_LABEL.to_string(),
    }
}

/// Parse a period string and snap it to the first day of its month
#[must_use]
pub fn parse_period(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), PERIOD_FORMAT)
        .ok()
        .and_then(|date| date.with_day(1))
}

/// Parse an observation value; non-finite numbers are rejected
#[must_use]
pub fn parse_value(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
