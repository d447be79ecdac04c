use serde::{Deserialize, Serialize};

use logihub_core::{DomainError, RecordId, SortDirection};
use logihub_inventory::{InventoryItem, Warehouse};

/// One row of the space view: a warehouse and how full it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseUtilization {
    pub id: RecordId,
    pub name: String,
    pub capacity: u32,
    pub used: u64,
    pub available: u64,
    pub percent_used: u32,
}

/// Rounded whole percent of `used` over `capacity`. Zero capacity reads as 0%.
pub fn percent_of(used: u64, capacity: u32) -> u32 {
    if capacity == 0 {
        return 0;
    }
    ((used as f64 / f64::from(capacity)) * 100.0).round() as u32
}

/// Compute utilization for every warehouse, in warehouse order.
///
/// `used` is the total quantity of inventory items stocked in the warehouse.
/// Overfilled warehouses report `available = 0` and a percentage above 100.
pub fn utilization(warehouses: &[Warehouse], inventory: &[InventoryItem]) -> Vec<WarehouseUtilization> {
    warehouses
        .iter()
        .map(|w| {
            let used: u64 = inventory
                .iter()
                .filter(|i| i.warehouse_id == w.id)
                .map(|i| u64::from(i.quantity))
                .sum();
            WarehouseUtilization {
                id: w.id.clone(),
                name: w.name.clone(),
                capacity: w.capacity,
                used,
                available: u64::from(w.capacity).saturating_sub(used),
                percent_used: percent_of(used, w.capacity),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationBand {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl UtilizationBand {
    pub fn admits(self, percent_used: u32) -> bool {
        match self {
            UtilizationBand::All => true,
            UtilizationBand::High => percent_used >= 80,
            UtilizationBand::Medium => (50..80).contains(&percent_used),
            UtilizationBand::Low => percent_used < 50,
        }
    }
}

impl core::str::FromStr for UtilizationBand {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(DomainError::validation(format!("unknown utilization band '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UtilizationSortKey {
    #[default]
    Name,
    Capacity,
    Used,
    Available,
    PercentUsed,
}

impl core::str::FromStr for UtilizationSortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "name" => Ok(Self::Name),
            "capacity" => Ok(Self::Capacity),
            "used" => Ok(Self::Used),
            "available" => Ok(Self::Available),
            "percentUsed" | "percent_used" => Ok(Self::PercentUsed),
            other => Err(DomainError::validation(format!("unknown sort column '{other}'"))),
        }
    }
}

pub fn sort_utilization(rows: &mut [WarehouseUtilization], key: UtilizationSortKey, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = match key {
            UtilizationSortKey::Name => a.name.cmp(&b.name),
            UtilizationSortKey::Capacity => a.capacity.cmp(&b.capacity),
            UtilizationSortKey::Used => a.used.cmp(&b.used),
            UtilizationSortKey::Available => a.available.cmp(&b.available),
            UtilizationSortKey::PercentUsed => a.percent_used.cmp(&b.percent_used),
        };
        direction.apply(ord)
    });
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceTotals {
    pub average_utilization: u32,
    pub total_available: u64,
    pub total_capacity: u64,
}

impl SpaceTotals {
    pub fn from_rows(rows: &[WarehouseUtilization]) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let sum: u64 = rows.iter().map(|r| u64::from(r.percent_used)).sum();
        Self {
            average_utilization: (sum as f64 / rows.len() as f64).round() as u32,
            total_available: rows.iter().map(|r| r.available).sum(),
            total_capacity: rows.iter().map(|r| u64::from(r.capacity)).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use proptest::prelude::*;

    use super::*;

    fn warehouse(id: &str, name: &str, capacity: u32) -> Warehouse {
        Warehouse { id: id.into(), name: name.into(), capacity }
    }

    fn item(warehouse_id: &str, quantity: u32) -> InventoryItem {
        InventoryItem {
            id: format!("item-{warehouse_id}-{quantity}").into(),
            name: "Thing".into(),
            quantity,
            category_id: "1".into(),
            category_name: "Electronics".into(),
            warehouse_id: warehouse_id.into(),
            warehouse_name: String::new(),
            location: "Rack A".into(),
            last_updated: NaiveDateTime::parse_from_str("2023-09-15 14:30:22", "%Y-%m-%d %H:%M:%S").unwrap(),
        }
    }

    #[test]
    fn used_is_stocked_quantity() {
        let whs = vec![
            warehouse("1", "Main Storage", 2000),
            warehouse("2", "Fashion Warehouse", 1500),
            warehouse("3", "Cold Storage", 1000),
        ];
        let inv = vec![item("1", 150), item("1", 25), item("2", 200), item("3", 1200)];
        let rows = utilization(&whs, &inv);

        assert_eq!(rows[0].used, 175);
        assert_eq!(rows[0].available, 1825);
        assert_eq!(rows[0].percent_used, 9);
        assert_eq!(rows[1].percent_used, 13);
        assert_eq!(rows[2].available, 0);
        assert_eq!(rows[2].percent_used, 120);
    }

    #[test]
    fn band_boundaries() {
        assert!(UtilizationBand::High.admits(80));
        assert!(!UtilizationBand::High.admits(79));
        assert!(UtilizationBand::Medium.admits(50));
        assert!(UtilizationBand::Medium.admits(79));
        assert!(UtilizationBand::Low.admits(49));
        assert!(!UtilizationBand::Low.admits(50));
    }

    #[test]
    fn sorts_by_name_and_numbers() {
        let whs = vec![
            warehouse("1", "Main Storage", 2000),
            warehouse("3", "Cold Storage", 1000),
            warehouse("4", "Electronics Depot", 800),
        ];
        let mut rows = utilization(&whs, &[]);
        sort_utilization(&mut rows, UtilizationSortKey::Name, SortDirection::Asc);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Cold Storage", "Electronics Depot", "Main Storage"]);

        sort_utilization(&mut rows, UtilizationSortKey::Capacity, SortDirection::Desc);
        assert_eq!(rows[0].capacity, 2000);
    }

    #[test]
    fn totals() {
        assert_eq!(SpaceTotals::from_rows(&[]), SpaceTotals::default());
        let whs = vec![warehouse("1", "A", 100), warehouse("2", "B", 100)];
        let rows = utilization(&whs, &[item("1", 50), item("2", 25)]);
        let t = SpaceTotals::from_rows(&rows);
        assert_eq!(t.average_utilization, 38);
        assert_eq!(t.total_available, 125);
        assert_eq!(t.total_capacity, 200);
    }

    proptest! {
        #[test]
        fn available_plus_used_covers_capacity(capacity in 1u32..5000, qty in 0u32..8000) {
            let rows = utilization(&[warehouse("1", "A", capacity)], &[item("1", qty)]);
            let r = &rows[0];
            prop_assert_eq!(r.available, u64::from(capacity).saturating_sub(u64::from(qty)));
            prop_assert!(r.used + r.available >= u64::from(capacity));
            let bands = [UtilizationBand::High, UtilizationBand::Medium, UtilizationBand::Low];
            prop_assert_eq!(bands.iter().filter(|b| b.admits(r.percent_used)).count(), 1);
        }
    }
}
