//! Remote table sources.
//!
//! The data service asks a `RemoteSource` for whole tables and falls back to
//! its in-memory collections when the call fails.

mod supabase;

pub use supabase::{SupabaseSettings, SupabaseSource};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected payload for table {table}: {message}")]
    Decode { table: String, message: String },
}

/// Table names as exposed by the remote backend.
pub mod tables {
    pub const INVENTORY: &str = "inventory_items";
    pub const CATEGORIES: &str = "categories";
    pub const WAREHOUSES: &str = "warehouses";
    pub const SHIPMENTS: &str = "shipments";
    pub const EQUIPMENT: &str = "equipment";
    pub const MAINTENANCE: &str = "maintenance_tasks";
}

#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Every row of `table` as raw JSON.
    async fn fetch_table(&self, table: &str) -> Result<Vec<JsonValue>, RemoteError>;

    fn source_name(&self) -> &'static str;
}

/// Fetch `table` and decode each row into `T`.
pub async fn fetch_records<T>(source: &dyn RemoteSource, table: &str) -> Result<Vec<T>, RemoteError>
where
    T: DeserializeOwned,
{
    let rows = source.fetch_table(table).await?;
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| RemoteError::Decode {
                table: table.to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}
