//! Mock datasets the dashboard starts with.

use chrono::{NaiveDate, NaiveDateTime};

use logihub_core::time::{DATE_FORMAT, TIMESTAMP_FORMAT};
use logihub_inventory::{Category, InventoryItem, Warehouse};
use logihub_maintenance::{
    Equipment, EquipmentStatus, MaintenanceKind, MaintenanceStatus, MaintenanceTask, TaskPriority,
};
use logihub_performance::{Department, PerformanceMetric, PerformanceReport, ReportKind, ReportStatus, default_kpis};
use logihub_shipments::{Shipment, ShipmentLine, ShipmentPriority, ShipmentStatus};
use logihub_space::{SpaceKind, SpaceStatus, StorageSpace};

/// Every collection the data layer serves, as first loaded.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub inventory: Vec<InventoryItem>,
    pub categories: Vec<Category>,
    pub warehouses: Vec<Warehouse>,
    pub shipments: Vec<Shipment>,
    pub equipment: Vec<Equipment>,
    pub tasks: Vec<MaintenanceTask>,
    pub spaces: Vec<StorageSpace>,
    pub metrics: Vec<PerformanceMetric>,
    pub reports: Vec<PerformanceReport>,
}

impl SeedData {
    pub fn empty() -> Self {
        Self {
            inventory: Vec::new(),
            categories: Vec::new(),
            warehouses: Vec::new(),
            shipments: Vec::new(),
            equipment: Vec::new(),
            tasks: Vec::new(),
            spaces: Vec::new(),
            metrics: Vec::new(),
            reports: Vec::new(),
        }
    }
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            inventory: inventory(),
            categories: categories(),
            warehouses: warehouses(),
            shipments: shipments(),
            equipment: equipment(),
            tasks: tasks(),
            spaces: spaces(),
            metrics: default_kpis(),
            reports: reports(),
        }
    }
}

// Seed literals are compile-time constants; a parse failure is a typo here.
fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap_or_default()
}

fn stamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap_or_default()
}

pub fn categories() -> Vec<Category> {
    ["Electronics", "Furniture", "Clothing", "Food", "Other"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| Category { id: (i + 1).to_string().into(), name: name.into() })
        .collect()
}

pub fn warehouses() -> Vec<Warehouse> {
    [
        ("Main Storage", 2000),
        ("Fashion Warehouse", 1500),
        ("Cold Storage", 1000),
        ("Electronics Depot", 800),
        ("Furniture Storage", 1200),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, capacity))| Warehouse { id: (i + 1).to_string().into(), name: name.into(), capacity })
    .collect()
}

pub fn inventory() -> Vec<InventoryItem> {
    #[allow(clippy::type_complexity)]
    let rows: [(&str, &str, u32, (&str, &str), (&str, &str), &str, &str); 5] = [
        ("1", "Smartphone X500", 150, ("1", "Electronics"), ("1", "Main Storage"), "Rack A-123", "2023-09-15 14:30:22"),
        ("2", "Office Chair", 30, ("2", "Furniture"), ("1", "Main Storage"), "Floor B-Zone 3", "2023-08-20 09:15:10"),
        ("3", "Summer T-Shirt", 500, ("3", "Clothing"), ("2", "Fashion Warehouse"), "Shelf C-78", "2023-09-10 16:45:30"),
        ("4", "USB-C Cable", 300, ("1", "Electronics"), ("1", "Main Storage"), "Rack A-45", "2023-09-08 11:20:15"),
        ("5", "Organic Apples", 200, ("4", "Food"), ("3", "Cold Storage"), "Fridge 12", "2023-09-18 08:30:00"),
    ];
    rows.into_iter()
        .map(|(id, name, quantity, (cat_id, cat), (wh_id, wh), location, updated)| InventoryItem {
            id: id.into(),
            name: name.into(),
            quantity,
            category_id: cat_id.into(),
            category_name: cat.into(),
            warehouse_id: wh_id.into(),
            warehouse_name: wh.into(),
            location: location.into(),
            last_updated: stamp(updated),
        })
        .collect()
}

fn line(item_id: &str, item_name: &str, quantity: u32) -> ShipmentLine {
    ShipmentLine { item_id: item_id.into(), item_name: item_name.into(), quantity }
}

pub fn shipments() -> Vec<Shipment> {
    let ship = |id: &str,
                origin: &str,
                destination: &str,
                items: Vec<ShipmentLine>,
                status,
                carrier: &str,
                tracking: &str,
                (departure, arrival, created): (&str, &str, &str),
                priority| Shipment {
        id: id.into(),
        origin: origin.into(),
        destination: destination.into(),
        items,
        status,
        carrier: carrier.into(),
        tracking_number: tracking.into(),
        departure_date: date(departure),
        estimated_arrival: date(arrival),
        priority,
        created_at: date(created),
    };

    vec![
        ship(
            "SH-1001",
            "Main Storage",
            "Retail Store #123",
            vec![line("1", "Smartphone X500", 20), line("4", "USB-C Cable", 50)],
            ShipmentStatus::InTransit,
            "FastShip Inc.",
            "FS23945832",
            ("2023-09-15", "2023-09-18", "2023-09-14"),
            ShipmentPriority::Standard,
        ),
        ship(
            "SH-1002",
            "Fashion Warehouse",
            "Online Fulfillment Center",
            vec![line("3", "Summer T-Shirt", 100)],
            ShipmentStatus::Pending,
            "QuickLogistics",
            "QL77823164",
            ("2023-09-20", "2023-09-22", "2023-09-19"),
            ShipmentPriority::Express,
        ),
        ship(
            "SH-1003",
            "Fashion Warehouse",
            "Miami Retail Store",
            vec![line("3", "Summer T-Shirt", 200)],
            ShipmentStatus::Delivered,
            "QuickLogistics",
            "TRK-4410357",
            ("2023-09-11", "2023-09-15", "2023-09-10"),
            ShipmentPriority::Standard,
        ),
        ship(
            "SH-1004",
            "Main Storage",
            "Tech Distributors",
            vec![line("4", "USB-C Cable", 100)],
            ShipmentStatus::InTransit,
            "FastShip Inc.",
            "TRK-7718204",
            ("2023-09-18", "2023-09-22", "2023-09-17"),
            ShipmentPriority::Standard,
        ),
        ship(
            "SH-1005",
            "Cold Storage",
            "Freshmart Groceries",
            vec![line("5", "Organic Apples", 50)],
            ShipmentStatus::Pending,
            "ColdChain Express",
            "TRK-2093481",
            ("2023-09-19", "2023-09-20", "2023-09-18"),
            ShipmentPriority::Rush,
        ),
    ]
}

pub fn equipment() -> Vec<Equipment> {
    [
        ("EQ-1001", "Forklift 1", "Forklift", "Main Storage - Zone A", "2023-08-15", EquipmentStatus::Operational),
        ("EQ-1002", "Conveyor Belt System", "Conveyor", "Main Storage - Loading Area", "2023-09-01", EquipmentStatus::Maintenance),
        ("EQ-1003", "Pallet Jack 3", "Pallet Jack", "Fashion Warehouse", "2023-07-22", EquipmentStatus::Broken),
        ("EQ-1004", "Sorting Machine", "Automated System", "Main Storage - Zone C", "2023-09-10", EquipmentStatus::Operational),
        ("EQ-1005", "Cold Storage Unit 1", "Refrigeration", "Cold Storage", "2023-08-25", EquipmentStatus::Operational),
    ]
    .into_iter()
    .map(|(id, name, kind, location, last, status)| Equipment {
        id: id.into(),
        name: name.into(),
        kind: kind.into(),
        location: location.into(),
        last_maintenance: date(last),
        status,
    })
    .collect()
}

pub fn tasks() -> Vec<MaintenanceTask> {
    let task = |id: &str,
                (equipment_id, equipment_name): (&str, &str),
                kind,
                description: &str,
                assigned_to: &str,
                scheduled: &str,
                status,
                priority,
                created: &str| MaintenanceTask {
        id: id.into(),
        equipment_id: equipment_id.into(),
        equipment_name: equipment_name.into(),
        kind,
        description: description.into(),
        assigned_to: assigned_to.into(),
        scheduled_date: date(scheduled),
        status,
        priority,
        created_at: date(created),
    };

    vec![
        task(
            "MT-1001",
            ("EQ-1002", "Conveyor Belt System"),
            MaintenanceKind::Preventive,
            "Regular inspection and belt adjustment",
            "John Doe",
            "2023-09-20",
            MaintenanceStatus::InProgress,
            TaskPriority::Medium,
            "2023-09-18",
        ),
        task(
            "MT-1002",
            ("EQ-1003", "Pallet Jack 3"),
            MaintenanceKind::Corrective,
            "Repair hydraulic system",
            "Mike Johnson",
            "2023-09-22",
            MaintenanceStatus::Pending,
            TaskPriority::High,
            "2023-09-17",
        ),
        task(
            "MT-1003",
            ("EQ-1001", "Forklift 1"),
            MaintenanceKind::Preventive,
            "Monthly safety check and lubricant change",
            "Sarah Williams",
            "2023-09-25",
            MaintenanceStatus::Pending,
            TaskPriority::Low,
            "2023-09-15",
        ),
        task(
            "MT-1004",
            ("EQ-1005", "Cold Storage Unit 1"),
            MaintenanceKind::Preventive,
            "Check cooling system and clean filters",
            "Jane Smith",
            "2023-09-15",
            MaintenanceStatus::Completed,
            TaskPriority::Medium,
            "2023-09-10",
        ),
    ]
}

pub fn spaces() -> Vec<StorageSpace> {
    [
        ("SP-1001", "Bulk Racking A", SpaceKind::Storage, 600, ("1", "Main Storage"), "Zone A", SpaceStatus::Active),
        ("SP-1002", "Loading Dock 2", SpaceKind::Loading, 150, ("1", "Main Storage"), "East wall", SpaceStatus::Active),
        ("SP-1003", "Packing Line", SpaceKind::Packaging, 200, ("2", "Fashion Warehouse"), "Ground floor", SpaceStatus::Maintenance),
    ]
    .into_iter()
    .map(|(id, name, kind, capacity, (wh_id, wh), location, status)| StorageSpace {
        id: id.into(),
        name: name.into(),
        kind,
        capacity,
        warehouse_id: wh_id.into(),
        warehouse_name: wh.into(),
        location: location.into(),
        status,
    })
    .collect()
}

pub fn reports() -> Vec<PerformanceReport> {
    vec![
        PerformanceReport {
            id: "PR-1001".into(),
            title: "Q2 Fulfillment Review".into(),
            description: "On-time delivery and order fill rates for April to June".into(),
            kind: ReportKind::Report,
            department: Department::Logistics,
            start_date: date("2023-04-01"),
            end_date: date("2023-06-30"),
            status: ReportStatus::Published,
            created_at: date("2023-07-03"),
        },
        PerformanceReport {
            id: "PR-1002".into(),
            title: "Warehouse Utilization Comparison".into(),
            description: "Capacity use across all sites".into(),
            kind: ReportKind::Comparison,
            department: Department::Warehouse,
            start_date: date("2023-07-01"),
            end_date: date("2023-09-15"),
            status: ReportStatus::Draft,
            created_at: date("2023-09-16"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_references_are_consistent() {
        let seed = SeedData::default();
        assert_eq!(seed.inventory.len(), 5);
        assert_eq!(seed.warehouses.len(), 5);
        assert_eq!(seed.categories.len(), 5);
        assert_eq!(seed.equipment.len(), 5);
        assert_eq!(seed.tasks.len(), 4);
        assert_eq!(seed.shipments.len(), 5);
        assert_eq!(seed.metrics.len(), 6);

        for item in &seed.inventory {
            assert!(seed.categories.iter().any(|c| c.id == item.category_id && c.name == item.category_name));
            assert!(seed.warehouses.iter().any(|w| w.id == item.warehouse_id && w.name == item.warehouse_name));
        }
        for task in &seed.tasks {
            assert!(seed.equipment.iter().any(|e| e.id == task.equipment_id && e.name == task.equipment_name));
        }
        for s in &seed.shipments {
            assert!(s.estimated_arrival >= s.departure_date);
            for l in &s.items {
                assert!(seed.inventory.iter().any(|i| i.id == l.item_id && i.name == l.item_name));
            }
        }
    }

    #[test]
    fn seed_dates_parse() {
        assert!(inventory().iter().all(|i| i.last_updated != NaiveDateTime::default()));
        assert!(shipments().iter().all(|s| s.created_at != NaiveDate::default()));
    }
}
