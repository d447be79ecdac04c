//! `logihub-infra`: the data layer behind the dashboard.
//!
//! - `store`: in-memory record collections
//! - `seed`: the mock datasets
//! - `remote`: optional Supabase (PostgREST) reads
//! - `data_service`: fetch / add / search / update operations with remote
//!   fallback and change notices

pub mod data_service;
pub mod remote;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use data_service::{
    ChangeAction, ChangeNotice, Clock, Collection, DataError, DataResult, DataService, FixedClock, SystemClock,
};
pub use remote::{RemoteError, RemoteSource, SupabaseSettings, SupabaseSource};
pub use seed::SeedData;
pub use snapshot::DataSnapshot;
pub use store::{InMemoryRecordStore, RecordStore};
