//! Inventory domain: stocked items, their categories and the warehouses that
//! hold them.
//!
//! Pure logic only (validation, search, sort, statistics). The data layer in
//! `logihub-infra` owns storage.

pub mod catalog;
pub mod item;
pub mod query;
pub mod stats;

pub use catalog::{Category, NewCategory, NewWarehouse, Warehouse};
pub use item::{InventoryItem, InventoryItemPatch, NewInventoryItem, ResolvedItem};
pub use query::{InventorySortKey, search, sort_items};
pub use stats::{InventoryStats, LOW_STOCK_THRESHOLD, LowStockItem, QuantityShare};
