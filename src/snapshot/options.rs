//! Storage options for the snapshot, parsed from their settings strings.

use std::fmt;
use std::str::FromStr;

use parquet::basic::{BrotliLevel, Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;

use crate::config::StorageConfig;
use crate::error::{HubError, Result};

/// Engine used to encode the snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageEngine {
    /// Arrow record batches written as Parquet
    #[default]
    Arrow,
}

impl FromStr for StorageEngine {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrow" | "pyarrow" => Ok(Self::Arrow),
            other => Err(HubError::config(format!("unsupported storage engine '{other}'"))),
        }
    }
}

/// Compression codec applied to snapshot pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapshotCompression {
    /// No compression
    Uncompressed,
    /// Snappy
    #[default]
    Snappy,
    /// Gzip at its default level
    Gzip,
    /// Zstandard at its default level
    Zstd,
    /// Brotli at its default level
    Brotli,
    /// LZ4 (raw block format)
    Lz4,
}

impl SnapshotCompression {
    /// Parquet codec for this option
    #[must_use]
    pub fn to_parquet(self) -> Compression {
        match self {
            Self::Uncompressed => Compression::UNCOMPRESSED,
            Self::Snappy => Compression::SNAPPY,
            Self::Gzip => Compression::GZIP(GzipLevel::default()),
            Self::Zstd => Compression::ZSTD(ZstdLevel::default()),
            Self::Brotli => Compression::BROTLI(BrotliLevel::default()),
            Self::Lz4 => Compression::LZ4_RAW,
        }
    }
}

impl FromStr for SnapshotCompression {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "uncompressed" => Ok(Self::Uncompressed),
            "snappy" => Ok(Self::Snappy),
            "gzip" => Ok(Self::Gzip),
            "zstd" => Ok(Self::Zstd),
            "brotli" => Ok(Self::Brotli),
            "lz4" => Ok(Self::Lz4),
            other => Err(HubError::config(format!("unsupported compression codec '{other}'"))),
        }
    }
}

impl fmt::Display for SnapshotCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uncompressed => "none",
            Self::Snappy => "snappy",
            Self::Gzip => "gzip",
            Self::Zstd => "zstd",
            Self::Brotli => "brotli",
            Self::Lz4 => "lz4",
        };
        f.write_str(name)
    }
}

/// Resolved storage options for writing a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// Encoding engine
    pub engine: StorageEngine,
    /// Page compression
    pub compression: SnapshotCompression,
}

impl SnapshotOptions {
    /// Parse the two option strings from settings
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        Ok(Self {
            engine: config.engine.parse()?,
            compression: config.compression.parse()?,
        })
    }

    /// Parquet writer properties for these options
    #[must_use]
    pub fn writer_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression.to_parquet())
            .build()
    }
}
