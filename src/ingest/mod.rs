//! Ingestion of the raw delimited extract.
//!
//! Every column is read as nullable text so that a malformed cell can never
//! fail the read; type conversion happens row by row in [`clean`].

pub mod clean;

use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{Array, StringArray};
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::util::require_file;
use crate::error::{HubError, Result};
use crate::utils::arrow::{downcast_array, required_column};
use crate::utils::{DEFAULT_BATCH_SIZE, log_operation_complete, log_operation_start};

pub use clean::{
    CleanRecord, CleaningOutcome, PERIOD_FORMAT, RejectionCounts, UNKNOWN_AREA_CODE,
    UNKNOWN_AREA_LABEL, clean_records,
};

/// Reference area code column
pub const AREA_CODE_COLUMN: &str = "REF_AREA";
/// Reference area label column
pub const AREA_LABEL_COLUMN: &str = "REF_AREA_LABEL";
/// Period column
pub const PERIOD_COLUMN: &str = "TIME_PERIOD";
/// Observation value column
pub const VALUE_COLUMN: &str = "OBS_VALUE";

/// Columns the raw extract must provide
pub const REQUIRED_COLUMNS: [&str; 4] = [
    AREA_CODE_COLUMN,
    AREA_LABEL_COLUMN,
    PERIOD_COLUMN,
    VALUE_COLUMN,
];

/// One row of the raw extract, untyped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Reference area code as found
    pub area_code: Option<String>,
    /// Reference area label as found
    pub area_label: Option<String>,
    /// Period string as found
    pub period: Option<String>,
    /// Observation value as found
    pub value: Option<String>,
}

impl RawRecord {
    /// Build a record from string slices
    #[must_use]
    pub fn new(area_code: &str, area_label: &str, period: &str, value: &str) -> Self {
        Self {
            area_code: Some(area_code.to_string()),
            area_label: Some(area_label.to_string()),
            period: Some(period.to_string()),
            value: Some(value.to_string()),
        }
    }
}

impl From<&CleanRecord> for RawRecord {
    fn from(record: &CleanRecord) -> Self {
        Self {
            area_code: Some(record.area_code.clone()),
            area_label: Some(record.area_label.clone()),
            period: Some(record.period.format(PERIOD_FORMAT).to_string()),
            value: Some(record.value.to_string()),
        }
    }
}

/// Read the raw extract
///
/// # Errors
/// `SourceNotFound` when the file is absent, `Schema` when the header lacks
/// one of [`REQUIRED_COLUMNS`], and IO/Arrow errors when the file cannot be read.
pub fn read_raw_csv(path: &Path) -> Result<Vec<RawRecord>> {
    log_operation_start("Reading raw extract", path);
    let start = Instant::now();

    let mut file = require_file(path, HubError::SourceNotFound)?;
    let format = Format::default().with_header(true);
    let (header, _) = format.infer_schema(&mut file, Some(0))?;
    file.seek(SeekFrom::Start(0))?;

    for column in REQUIRED_COLUMNS {
        if header.index_of(column).is_err() {
            return Err(HubError::schema(format!(
                "raw extract {} has no '{column}' column",
                path.display()
            )));
        }
    }

    let text_schema = Schema::new(
        header
            .fields()
            .iter()
            .map(|field| Field::new(field.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    );

    let reader = ReaderBuilder::new(Arc::new(text_schema))
        .with_header(true)
        .with_truncated_rows(true)
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build(file)?;

    let mut records = Vec::new();
    for batch in reader {
        append_batch(&batch?, &mut records)?;
    }

    log_operation_complete("read", path, records.len(), Some(start.elapsed()));
    Ok(records)
}

fn append_batch(batch: &RecordBatch, records: &mut Vec<RawRecord>) -> Result<()> {
    let codes = required_column(batch, AREA_CODE_COLUMN, &DataType::Utf8)?;
    let labels = required_column(batch, AREA_LABEL_COLUMN, &DataType::Utf8)?;
    let periods = required_column(batch, PERIOD_COLUMN, &DataType::Utf8)?;
    let values = required_column(batch, VALUE_COLUMN, &DataType::Utf8)?;

    let codes = downcast_array::<StringArray>(&codes, AREA_CODE_COLUMN, "String")?;
    let labels = downcast_array::<StringArray>(&labels, AREA_LABEL_COLUMN, "String")?;
    let periods = downcast_array::<StringArray>(&periods, PERIOD_COLUMN, "String")?;
    let values = downcast_array::<StringArray>(&values, VALUE_COLUMN, "String")?;

    records.reserve(batch.num_rows());
    for row in 0..batch.num_rows() {
        records.push(RawRecord {
            area_code: text_at(codes, row),
            area_label: text_at(labels, row),
            period: text_at(periods, row),
            value: text_at(values, row),
        });
    }
    Ok(())
}

fn text_at(array: &StringArray, row: usize) -> Option<String> {
    (!array.is_null(row)).then(|| array.value(row).to_string())
}
