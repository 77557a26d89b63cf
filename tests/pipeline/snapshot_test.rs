use std::fs::File;

use arrow::datatypes::DataType;
use inflation_hub::snapshot::{SnapshotCompression, StorageEngine};
use inflation_hub::{HubError, ObservationTable, SnapshotOptions, read_snapshot, write_snapshot};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::utils::{month, monthly_series, observation, timed_execution};

fn sample_table() -> ObservationTable {
    let mut rows = monthly_series("TUR", "Turkiye", month(2021, 10), &[19.9, 21.3, 36.1, 48.7]);
    rows.extend(monthly_series("JPN", "Japan", month(2021, 10), &[0.1, 0.6, 0.8, 0.5]));
    rows.push(observation("XKX", "Kosovo", month(2007, 6), -0.25));
    ObservationTable::new(rows)
}

#[test]
fn test_snapshot_round_trip() -> inflation_hub::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("processed").join("inflation.parquet");
    let table = sample_table();

    write_snapshot(&table, &path, &SnapshotOptions::default())?;
    let (elapsed, loaded) = timed_execution(|| read_snapshot(&path));
    let loaded = loaded?;
    println!("Read {} rows in {elapsed:?}", loaded.len());

    assert_eq!(loaded, table);
    assert!(!dir.path().join("processed").join("inflation.parquet.tmp").exists());
    Ok(())
}

#[test]
fn test_snapshot_keeps_date_semantics() -> inflation_hub::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("inflation.parquet");
    write_snapshot(&sample_table(), &path, &SnapshotOptions::default())?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path)?)?;
    let schema = builder.schema();
    let names: Vec<&str> = schema.fields().iter().map(|field| field.name().as_str()).collect();

    assert_eq!(
        names,
        vec![
            "REF_AREA",
            "REF_AREA_LABEL",
            "TIME_PERIOD",
            "OBS_VALUE",
            "region",
            "year",
            "month",
            "quarter",
            "decade",
            "era"
        ]
    );
    assert_eq!(schema.field_with_name("TIME_PERIOD")?.data_type(), &DataType::Date32);
    assert_eq!(schema.field_with_name("OBS_VALUE")?.data_type(), &DataType::Float64);
    Ok(())
}

#[test]
fn test_every_codec_round_trips() -> inflation_hub::Result<()> {
    let dir = tempfile::tempdir()?;
    let table = sample_table();

    for codec in ["snappy", "gzip", "zstd", "brotli", "lz4", "none"] {
        let options = SnapshotOptions {
            engine: StorageEngine::Arrow,
            compression: codec.parse::<SnapshotCompression>()?,
        };
        let path = dir.path().join(format!("inflation-{codec}.parquet"));
        write_snapshot(&table, &path, &options)?;
        assert_eq!(read_snapshot(&path)?, table, "codec {codec}");
    }
    Ok(())
}

#[test]
fn test_rewrite_replaces_previous_snapshot() -> inflation_hub::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("inflation.parquet");

    write_snapshot(&sample_table(), &path, &SnapshotOptions::default())?;
    let smaller = ObservationTable::new(vec![observation("USA", "United States", month(2024, 1), 3.1)]);
    write_snapshot(&smaller, &path, &SnapshotOptions::default())?;

    assert_eq!(read_snapshot(&path)?.len(), 1);
    Ok(())
}

#[test]
fn test_missing_snapshot_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_snapshot(&dir.path().join("absent.parquet")).unwrap_err();
    assert!(matches!(err, HubError::SnapshotNotFound(_)));
}

#[test]
fn test_unknown_codec_is_rejected() {
    let err = "lzma".parse::<SnapshotCompression>().unwrap_err();
    assert!(matches!(err, HubError::Config(_)));
    let err = "feather".parse::<StorageEngine>().unwrap_err();
    assert!(matches!(err, HubError::Config(_)));
}
