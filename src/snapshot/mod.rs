//! Snapshot writer and reader.
//!
//! The enriched table is persisted as a single Parquet file. Writes go to a
//! sibling temporary file that is renamed over the target only once complete,
//! so a failed write never replaces a valid snapshot.

pub mod options;
pub mod schema;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::util::{ensure_directory, require_file};
use crate::error::{HubError, Result};
use crate::models::ObservationTable;
use crate::utils::{DEFAULT_BATCH_SIZE, log_operation_complete, log_operation_start, log_warning};

pub use options::{SnapshotCompression, SnapshotOptions, StorageEngine};
pub use schema::{from_record_batch, snapshot_schema, to_record_batch};

/// Persist the table at `path`, replacing any previous snapshot atomically
pub fn write_snapshot(table: &ObservationTable, path: &Path, options: &SnapshotOptions) -> Result<()> {
    log_operation_start("Writing snapshot", path);
    let start = Instant::now();

    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let staging = staging_path(path);
    let written = match options.engine {
        StorageEngine::Arrow => write_parquet(table, &staging, options),
    }
    .and_then(|()| fs::rename(&staging, path).map_err(HubError::from));
    if let Err(err) = written {
        if staging.exists() && fs::remove_file(&staging).is_err() {
            log_warning("Could not remove partial snapshot", Some(&staging));
        }
        return Err(err);
    }

    log_operation_complete("wrote", path, table.len(), Some(start.elapsed()));
    Ok(())
}

/// Load a snapshot written by [`write_snapshot`]
///
/// # Errors
/// `SnapshotNotFound` when no snapshot exists at `path`; `Schema` when the
/// file does not have the snapshot layout.
pub fn read_snapshot(path: &Path) -> Result<ObservationTable> {
    log_operation_start("Reading snapshot", path);
    let start = Instant::now();

    let file = require_file(path, HubError::SnapshotNotFound)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build()?;

    let mut rows = Vec::new();
    for batch in reader {
        rows.extend(from_record_batch(&batch?)?);
    }

    log_operation_complete("read", path, rows.len(), Some(start.elapsed()));
    Ok(ObservationTable::new(rows))
}

fn write_parquet(table: &ObservationTable, path: &Path, options: &SnapshotOptions) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, snapshot_schema(), Some(options.writer_properties()))?;

    for chunk in table.rows().chunks(DEFAULT_BATCH_SIZE) {
        writer.write(&to_record_batch(chunk)?)?;
    }

    let file = writer.into_inner()?;
    file.sync_all()?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("snapshot"), ToOwned::to_owned);
    name.push(".tmp");
    path.with_file_name(name)
}
