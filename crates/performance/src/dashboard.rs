//! Summary cards and chart data for the landing dashboard.

use serde::Serialize;

use logihub_inventory::{InventoryItem, InventoryStats, Warehouse};
use logihub_maintenance::{Equipment, EquipmentCounts, MaintenanceTask, TaskCounts};
use logihub_shipments::{Shipment, StatusCounts};
use logihub_space::{SpaceTotals, utilization};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCards {
    pub total_inventory: u64,
    pub item_count: usize,
    pub space_utilization: u32,
    pub pending_shipments: usize,
    pub in_transit_shipments: usize,
    pub equipment_operational_percent: u32,
    pub open_maintenance_tasks: usize,
}

/// One pie or bar segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: u64,
}

impl ChartSlice {
    fn new(name: impl Into<String>, value: impl Into<u64>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub cards: DashboardCards,
    /// Percent of stocked quantity per category.
    pub inventory_by_category: Vec<ChartSlice>,
    pub shipments_by_status: Vec<ChartSlice>,
    pub maintenance_by_status: Vec<ChartSlice>,
}

impl DashboardOverview {
    pub fn compute(
        inventory: &[InventoryItem],
        warehouses: &[Warehouse],
        shipments: &[Shipment],
        equipment: &[Equipment],
        tasks: &[MaintenanceTask],
    ) -> Self {
        let stock = InventoryStats::from_items(inventory);
        let space = SpaceTotals::from_rows(&utilization(warehouses, inventory));
        let shipment_counts = StatusCounts::from_shipments(shipments);
        let equipment_counts = EquipmentCounts::from_equipment(equipment);
        let task_counts = TaskCounts::from_tasks(tasks);

        let cards = DashboardCards {
            total_inventory: stock.total_quantity,
            item_count: stock.item_count,
            space_utilization: space.average_utilization,
            pending_shipments: shipment_counts.pending,
            in_transit_shipments: shipment_counts.in_transit,
            equipment_operational_percent: equipment_counts.operational_percent(),
            open_maintenance_tasks: task_counts.open(),
        };

        let inventory_by_category = stock
            .by_category
            .iter()
            .map(|share| {
                let pct = if stock.total_quantity == 0 {
                    0
                } else {
                    ((share.quantity as f64 / stock.total_quantity as f64) * 100.0).round() as u64
                };
                ChartSlice::new(share.name.clone(), pct)
            })
            .collect();

        let count = |n: usize| n as u64;
        Self {
            cards,
            inventory_by_category,
            shipments_by_status: vec![
                ChartSlice::new("Pending", count(shipment_counts.pending)),
                ChartSlice::new("In Transit", count(shipment_counts.in_transit)),
                ChartSlice::new("Delivered", count(shipment_counts.delivered)),
            ],
            maintenance_by_status: vec![
                ChartSlice::new("Pending", count(task_counts.pending)),
                ChartSlice::new("In Progress", count(task_counts.in_progress)),
                ChartSlice::new("Completed", count(task_counts.completed)),
            ],
        }
    }
}
