//! Inventory table search and column sort.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use logihub_core::{DomainError, SortDirection, matches_any};

use crate::item::InventoryItem;

/// Sortable columns of the inventory table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InventorySortKey {
    Name,
    Quantity,
    CategoryName,
    WarehouseName,
    Location,
    LastUpdated,
}

impl FromStr for InventorySortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "quantity" => Ok(Self::Quantity),
            "categoryName" | "category" => Ok(Self::CategoryName),
            "warehouseName" | "warehouse" => Ok(Self::WarehouseName),
            "location" => Ok(Self::Location),
            "lastUpdated" => Ok(Self::LastUpdated),
            other => Err(DomainError::validation(format!("unknown sort key '{other}'"))),
        }
    }
}

/// Items whose name, category, warehouse or location contain `term`.
pub fn search<'a>(items: &'a [InventoryItem], term: &str) -> Vec<&'a InventoryItem> {
    items
        .iter()
        .filter(|i| {
            matches_any(
                term,
                [
                    i.name.as_str(),
                    i.category_name.as_str(),
                    i.warehouse_name.as_str(),
                    i.location.as_str(),
                ],
            )
        })
        .collect()
}

/// Stable in-place sort by one column.
pub fn sort_items(items: &mut [InventoryItem], key: InventorySortKey, direction: SortDirection) {
    items.sort_by(|a, b| direction.apply(compare(a, b, key)));
}

fn compare(a: &InventoryItem, b: &InventoryItem, key: InventorySortKey) -> Ordering {
    match key {
        InventorySortKey::Name => a.name.cmp(&b.name),
        InventorySortKey::Quantity => a.quantity.cmp(&b.quantity),
        InventorySortKey::CategoryName => a.category_name.cmp(&b.category_name),
        InventorySortKey::WarehouseName => a.warehouse_name.cmp(&b.warehouse_name),
        InventorySortKey::Location => a.location.cmp(&b.location),
        InventorySortKey::LastUpdated => a.last_updated.cmp(&b.last_updated),
    }
}
