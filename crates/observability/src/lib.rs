//! Process-wide logging setup.

/// Tracing subscriber configuration (filters, formatters).
pub mod tracing;

pub use crate::tracing::{LogFormat, init};
