//! Arrow data handling utilities
//!
//! Helpers for pulling typed columns out of record batches with clear errors.

pub mod array_utils;

pub use array_utils::{downcast_array, required_column};
