//! Inflation analytics core: a raw CPI extract is cleaned, tagged with region
//! and era, persisted as a Parquet snapshot, and served to stateless
//! aggregation functions.

pub mod analytics;
pub mod config;
pub mod enrich;
pub mod error;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod region;
pub mod snapshot;
pub mod utils;

// Core types
pub use config::{AnalyticsConfig, PipelineConfig};
pub use error::{HubError, Result};
pub use models::{Era, Observation, ObservationTable, Region};

// Pipeline stages
pub use enrich::enrich;
pub use ingest::{RawRecord, RejectionCounts, clean_records, read_raw_csv};
pub use pipeline::{PipelineReport, build_table, run_pipeline, run_pipeline_from_settings};
pub use region::{RegionClassifier, classify_region};
pub use snapshot::{SnapshotOptions, read_snapshot, write_snapshot};

// Arrow types
pub use arrow::record_batch::RecordBatch;

pub use utils::DEFAULT_BATCH_SIZE;
