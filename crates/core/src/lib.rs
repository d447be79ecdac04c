//! `logihub-core`: shared building blocks for the warehouse domain crates.
//!
//! Nothing in here performs IO: errors, identifiers, date formats and the
//! small search/sort helpers every view uses.

pub mod entity;
pub mod error;
pub mod id;
pub mod query;
pub mod time;
pub mod validate;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{IdSequence, RecordId};
pub use query::{SortDirection, contains_ci, matches_any};
pub use validate::{require_id, require_text};
