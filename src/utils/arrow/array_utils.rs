//! Utilities for working with Arrow arrays.
//!
//! This module provides functions for safely extracting typed columns from
//! record batches, reporting missing or mistyped columns as schema errors.

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{HubError, Result};

/// Get a required column from a record batch, checking its data type
///
/// # Returns
///
/// * `Ok(ArrayRef)` - The column array if found with the expected type
/// * `Err(HubError::Schema)` - If the column is missing or has the wrong type
pub fn required_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(column_name)
        .map_err(|_| HubError::schema(format!("column '{column_name}' not found")))?;

    let column = batch.column(idx);
    if column.data_type() != expected_type {
        return Err(HubError::schema(format!(
            "column '{column_name}' has type {:?}, expected {expected_type:?}",
            column.data_type()
        )));
    }

    Ok(column.clone())
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Type Parameters
///
/// * `A` - The target array type to downcast to
///
/// # Arguments
///
/// * `array` - The array reference to downcast
/// * `column_name` - The name of the column (for error messages)
/// * `expected_type_name` - A human-readable name of the expected type (for error messages)
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        HubError::schema(format!(
            "column '{column_name}' could not be read as {expected_type_name}"
        ))
    })
}
