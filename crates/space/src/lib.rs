//! Warehouse space: utilization derived from stocked quantities, and the
//! storage sub-areas (loading bays, packing zones) inside each warehouse.

pub mod storage;
pub mod utilization;

pub use storage::{NewStorageSpace, SpaceKind, SpaceStatus, StorageSpace};
pub use utilization::{
    SpaceTotals, UtilizationBand, UtilizationSortKey, WarehouseUtilization, sort_utilization,
    utilization,
};
