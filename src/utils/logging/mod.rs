//! Logging utilities
//!
//! Consistent log lines for pipeline and snapshot operations.

pub mod log;

pub use log::{log_operation_complete, log_operation_start, log_warning};
