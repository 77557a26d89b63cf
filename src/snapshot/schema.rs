//! Columnar layout of the snapshot and conversion to and from record batches.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, Date32Array, Float64Array, Int32Array, StringArray, UInt32Array,
};
use arrow::datatypes::{DataType, Date32Type, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::error::{HubError, Result};
use crate::ingest::{AREA_CODE_COLUMN, AREA_LABEL_COLUMN, PERIOD_COLUMN, VALUE_COLUMN};
use crate::models::{Era, Observation, Region};
use crate::utils::arrow::{downcast_array, required_column};

/// Region column
pub const REGION_COLUMN: &str = "region";
/// Year column
pub const YEAR_COLUMN: &str = "year";
/// Month column
pub const MONTH_COLUMN: &str = "month";
/// Quarter column
pub const QUARTER_COLUMN: &str = "quarter";
/// Decade column
pub const DECADE_COLUMN: &str = "decade";
/// Era column
pub const ERA_COLUMN: &str = "era";

/// Arrow schema of the snapshot
#[must_use]
pub fn snapshot_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(AREA_CODE_COLUMN, DataType::Utf8, false),
        Field::new(AREA_LABEL_COLUMN, DataType::Utf8, false),
        Field::new(PERIOD_COLUMN, DataType::Date32, false),
        Field::new(VALUE_COLUMN, DataType::Float64, false),
        Field::new(REGION_COLUMN, DataType::Utf8, false),
        Field::new(YEAR_COLUMN, DataType::Int32, false),
        Field::new(MONTH_COLUMN, DataType::UInt32, false),
        Field::new(QUARTER_COLUMN, DataType::UInt32, false),
        Field::new(DECADE_COLUMN, DataType::Int32, false),
        Field::new(ERA_COLUMN, DataType::Utf8, false),
    ]))
}

/// Encode observations as a record batch
pub fn to_record_batch(rows: &[Observation]) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|row| row.area_code.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|row| row.area_label.as_str()),
        )),
        Arc::new(Date32Array::from(
            rows.iter()
                .map(|row| Date32Type::from_naive_date(row.period))
                .collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter().map(|row| row.value).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|row| row.region.label()),
        )),
        Arc::new(Int32Array::from(
            rows.iter().map(|row| row.year).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            rows.iter().map(|row| row.month).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            rows.iter().map(|row| row.quarter).collect::<Vec<_>>(),
        )),
        Arc::new(Int32Array::from(
            rows.iter().map(|row| row.decade).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|row| row.era.label()),
        )),
    ];

    Ok(RecordBatch::try_new(snapshot_schema(), columns)?)
}

/// Decode a snapshot record batch
///
/// # Errors
/// `Schema` when a column is missing, mistyped, holds nulls, or carries an
/// era label this build does not know.
pub fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Observation>> {
    let codes = required_column(batch, AREA_CODE_COLUMN, &DataType::Utf8)?;
    let labels = required_column(batch, AREA_LABEL_COLUMN, &DataType::Utf8)?;
    let periods = required_column(batch, PERIOD_COLUMN, &DataType::Date32)?;
    let values = required_column(batch, VALUE_COLUMN, &DataType::Float64)?;
    let regions = required_column(batch, REGION_COLUMN, &DataType::Utf8)?;
    let years = required_column(batch, YEAR_COLUMN, &DataType::Int32)?;
    let months = required_column(batch, MONTH_COLUMN, &DataType::UInt32)?;
    let quarters = required_column(batch, QUARTER_COLUMN, &DataType::UInt32)?;
    let decades = required_column(batch, DECADE_COLUMN, &DataType::Int32)?;
    let eras = required_column(batch, ERA_COLUMN, &DataType::Utf8)?;

    for (name, column) in [
        (AREA_CODE_COLUMN, &codes),
        (AREA_LABEL_COLUMN, &labels),
        (PERIOD_COLUMN, &periods),
        (VALUE_COLUMN, &values),
        (REGION_COLUMN, &regions),
        (YEAR_COLUMN, &years),
        (MONTH_COLUMN, &months),
        (QUARTER_COLUMN, &quarters),
        (DECADE_COLUMN, &decades),
        (ERA_COLUMN, &eras),
    ] {
        if column.null_count() > 0 {
            return Err(HubError::schema(format!("column '{name}' contains nulls")));
        }
    }

    let codes = downcast_array::<StringArray>(&codes, AREA_CODE_COLUMN, "String")?;
    let labels = downcast_array::<StringArray>(&labels, AREA_LABEL_COLUMN, "String")?;
    let periods = downcast_array::<Date32Array>(&periods, PERIOD_COLUMN, "Date32")?;
    let values = downcast_array::<Float64Array>(&values, VALUE_COLUMN, "Float64")?;
    let regions = downcast_array::<StringArray>(&regions, REGION_COLUMN, "String")?;
    let years = downcast_array::<Int32Array>(&years, YEAR_COLUMN, "Int32")?;
    let months = downcast_array::<UInt32Array>(&months, MONTH_COLUMN, "UInt32")?;
    let quarters = downcast_array::<UInt32Array>(&quarters, QUARTER_COLUMN, "UInt32")?;
    let decades = downcast_array::<Int32Array>(&decades, DECADE_COLUMN, "Int32")?;
    let eras = downcast_array::<StringArray>(&eras, ERA_COLUMN, "String")?;

    (0..batch.num_rows())
        .map(|row| {
            let period = periods.value_as_date(row).ok_or_else(|| {
                HubError::schema(format!("row {row} has an out-of-range {PERIOD_COLUMN}"))
            })?;
            let era = Era::from_label(eras.value(row)).ok_or_else(|| {
                HubError::schema(format!("row {row} has unknown era '{}'", eras.value(row)))
            })?;

            Ok(Observation {
                area_code: codes.value(row).to_string(),
                area_label: labels.value(row).to_string(),
                period,
                value: values.value(row),
                region: Region::from_label(regions.value(row)),
                year: years.value(row),
                month: months.value(row),
                quarter: quarters.value(row),
                decade: decades.value(row),
                era,
            })
        })
        .collect()
}
