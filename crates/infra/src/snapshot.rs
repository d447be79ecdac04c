use serde::Serialize;

use logihub_assistant::WarehouseData;
use logihub_inventory::{InventoryItem, Warehouse};
use logihub_maintenance::{Equipment, MaintenanceTask};
use logihub_performance::PerformanceMetric;
use logihub_shipments::Shipment;

/// Point-in-time copy of the collections the assistant reasons over.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataSnapshot {
    pub inventory: Vec<InventoryItem>,
    pub warehouses: Vec<Warehouse>,
    pub shipments: Vec<Shipment>,
    pub equipment: Vec<Equipment>,
    pub maintenance: Vec<MaintenanceTask>,
    pub performance: Vec<PerformanceMetric>,
}

impl From<DataSnapshot> for WarehouseData {
    fn from(s: DataSnapshot) -> Self {
        WarehouseData {
            inventory: s.inventory,
            warehouses: s.warehouses,
            shipments: s.shipments,
            equipment: s.equipment,
            maintenance: s.maintenance,
            performance: s.performance,
        }
    }
}
