//! Configuration for the pipeline and the aggregation engine.
//!
//! `PipelineConfig` carries resolved paths and the two storage options.
//! `AnalyticsConfig` is the single parameter set handed to every aggregation
//! function; its defaults are the values the dashboard views start from.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HubError, Result};

/// Default settings file used by the binary
pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.json";

/// Window sizes offered for rolling volatility
pub const VOLATILITY_WINDOWS: [usize; 4] = [3, 6, 12, 24];

/// Window sizes offered for structural break detection
pub const BREAK_WINDOWS: [u32; 4] = [3, 6, 9, 12];

/// Thresholds offered for hotspot tracking
pub const HOTSPOT_THRESHOLDS: [f64; 4] = [5.0, 10.0, 15.0, 20.0];

/// Location of the raw extract and of the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the raw extract
    pub raw_dir: PathBuf,
    /// File name of the raw extract inside `raw_dir`
    pub raw_file: String,
    /// Directory the snapshot is written to
    pub processed_dir: PathBuf,
    /// File name of the snapshot inside `processed_dir`
    pub processed_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            raw_file: "inflation.csv".to_string(),
            processed_dir: PathBuf::from("data/processed"),
            processed_file: "inflation.parquet".to_string(),
        }
    }
}

/// Storage options for the snapshot, kept as the strings found in settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage engine name
    #[serde(alias = "parquet_engine")]
    pub engine: String,
    /// Compression codec name
    pub compression: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            engine: "arrow".to_string(),
            compression: "snappy".to_string(),
        }
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Input and output locations
    pub data: DataConfig,
    /// Snapshot storage options
    #[serde(default)]
    pub pipeline: StorageConfig,
}

impl PipelineConfig {
    /// Load settings from a JSON file
    ///
    /// The file must contain a `data` section; `pipeline` falls back to its
    /// defaults when absent.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(HubError::config(format!(
                "settings file missing at {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse settings from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if value.get("data").is_none() {
            return Err(HubError::config("settings must include a \"data\" section"));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Full path of the raw extract
    #[must_use]
    pub fn raw_path(&self) -> PathBuf {
        self.data.raw_dir.join(&self.data.raw_file)
    }

    /// Full path of the snapshot
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.data.processed_dir.join(&self.data.processed_file)
    }
}

/// Parameters for the aggregation engine
///
/// Build one with struct update syntax to change a single knob:
/// `AnalyticsConfig { break_window: 3, ..AnalyticsConfig::default() }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Trailing observations per rolling volatility window
    pub volatility_window: usize,
    /// Minimum observations before a rolling volatility is emitted
    pub volatility_min_periods: usize,
    /// Calendar months per structural break window
    pub break_window: u32,
    /// Value at or above which a country counts as a hotspot
    pub hotspot_threshold: f64,
    /// Value at or below which a month counts as stable
    pub stability_threshold: f64,
    /// Value at or above which a month counts as severe
    pub severe_threshold: f64,
    /// Trailing periods for the global rolling mean
    pub timeline_window: usize,
    /// Minimum periods before the global rolling mean is emitted
    pub timeline_min_periods: usize,
    /// Trailing periods used to smooth trend and spread series (1 disables)
    pub smoothing_window: usize,
    /// Absolute month-over-month change that raises an alert
    pub alert_sensitivity: f64,
    /// Rows in record boards and mover tables
    pub top_n: usize,
    /// Countries listed per era
    pub leaderboard_size: usize,
    /// Countries listed in the persistence ranking
    pub persistence_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            volatility_window: 12,
            volatility_min_periods: 3,
            break_window: 6,
            hotspot_threshold: 10.0,
            stability_threshold: 5.0,
            severe_threshold: 15.0,
            timeline_window: 12,
            timeline_min_periods: 6,
            smoothing_window: 1,
            alert_sensitivity: 2.0,
            top_n: 10,
            leaderboard_size: 5,
            persistence_limit: 30,
        }
    }
}
