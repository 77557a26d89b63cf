//! Domain models
//!
//! The enriched observation and its derived dimension types.

pub mod observation;
pub mod types;

pub use observation::{Observation, ObservationTable};
pub use types::{Era, Region};
