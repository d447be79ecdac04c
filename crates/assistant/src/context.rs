use serde::{Deserialize, Serialize};

use logihub_inventory::{InventoryItem, Warehouse};
use logihub_maintenance::{Equipment, MaintenanceTask};
use logihub_performance::PerformanceMetric;
use logihub_shipments::Shipment;

/// Everything the assistant may look at, keyed the way it is sent to the
/// chat-completion API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseData {
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub warehouses: Vec<Warehouse>,
    #[serde(default)]
    pub shipments: Vec<Shipment>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub maintenance: Vec<MaintenanceTask>,
    #[serde(default)]
    pub performance: Vec<PerformanceMetric>,
}
