//! Pipeline entry point: raw extract to enriched snapshot.
//!
//! Setup problems (missing directory, file or settings) abort the run.
//! Malformed rows only reduce the row count in the report.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::enrich::enrich;
use crate::error::util::{ensure_directory, require_directory};
use crate::error::{HubError, Result};
use crate::ingest::{RawRecord, RejectionCounts, clean_records, read_raw_csv};
use crate::models::ObservationTable;
use crate::region::RegionClassifier;
use crate::snapshot::{SnapshotOptions, write_snapshot};

/// Summary of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    /// Rows in the snapshot
    pub rows_processed: usize,
    /// Distinct area codes
    pub countries: usize,
    /// Distinct months
    pub periods: usize,
    /// Earliest month, absent for an empty snapshot
    pub time_start: Option<NaiveDate>,
    /// Latest month, absent for an empty snapshot
    pub time_end: Option<NaiveDate>,
    /// Where the snapshot was written
    pub snapshot_path: PathBuf,
    /// Breakdown of rows removed during cleaning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<RejectionCounts>,
}

impl PipelineReport {
    /// Summarise an enriched table written to `snapshot_path`
    #[must_use]
    pub fn from_table(table: &ObservationTable, snapshot_path: &Path) -> Self {
        Self {
            rows_processed: table.len(),
            countries: table.country_count(),
            periods: table.period_count(),
            time_start: table.earliest_period(),
            time_end: table.latest_period(),
            snapshot_path: snapshot_path.to_path_buf(),
            rejected: None,
        }
    }

    /// Attach the cleaning diagnostics
    #[must_use]
    pub const fn with_rejections(mut self, rejected: RejectionCounts) -> Self {
        self.rejected = Some(rejected);
        self
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Clean and enrich raw records in memory
#[must_use]
pub fn build_table(
    raw: Vec<RawRecord>,
    classifier: &RegionClassifier,
) -> (ObservationTable, RejectionCounts) {
    let outcome = clean_records(raw);
    (enrich(outcome.records, classifier), outcome.rejected)
}

/// Run the pipeline described by `config`
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    let start = Instant::now();
    let options = SnapshotOptions::from_config(&config.pipeline)?;

    require_directory(&config.data.raw_dir, HubError::SourceNotFound)?;
    ensure_directory(&config.data.processed_dir)?;

    let raw = read_raw_csv(&config.raw_path())?;
    let raw_rows = raw.len();

    let (table, rejected) = build_table(raw, RegionClassifier::shared());
    info!(
        "Cleaned {} of {} raw rows ({} removed)",
        table.len(),
        raw_rows,
        rejected.total()
    );
    debug!(
        "Removed rows: {} invalid period, {} invalid value, {} duplicates",
        rejected.invalid_period, rejected.invalid_value, rejected.duplicates
    );

    let snapshot_path = config.snapshot_path();
    write_snapshot(&table, &snapshot_path, &options)?;

    info!("Pipeline finished in {:?}", start.elapsed());
    Ok(PipelineReport::from_table(&table, &snapshot_path).with_rejections(rejected))
}

/// Load settings from `settings_path` and run the pipeline
pub fn run_pipeline_from_settings(settings_path: &Path) -> Result<PipelineReport> {
    run_pipeline(&PipelineConfig::from_json_file(settings_path)?)
}
