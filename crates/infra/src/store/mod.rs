//! Record storage for the mock data layer.

pub mod record_store;

pub use record_store::{InMemoryRecordStore, RecordStore};
