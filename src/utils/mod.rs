//! Utility functions shared by the pipeline and snapshot modules

pub mod arrow;
pub mod logging;

pub use logging::{log_operation_complete, log_operation_start, log_warning};

/// Default number of rows per Arrow record batch
pub const DEFAULT_BATCH_SIZE: usize = 16384;
