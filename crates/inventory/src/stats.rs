//! Inventory aggregates used by the inventory header, the dashboard and the
//! assistant.

use serde::Serialize;

use logihub_core::RecordId;

use crate::item::InventoryItem;

/// Items below this quantity are reported as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub id: RecordId,
    pub name: String,
    pub quantity: u32,
}

/// Quantity held under one category or warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityShare {
    pub id: RecordId,
    pub name: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub item_count: usize,
    pub total_quantity: u64,
    pub low_stock: Vec<LowStockItem>,
    pub by_warehouse: Vec<QuantityShare>,
    pub by_category: Vec<QuantityShare>,
}

impl InventoryStats {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        Self::with_threshold(items, LOW_STOCK_THRESHOLD)
    }

    pub fn with_threshold(items: &[InventoryItem], threshold: u32) -> Self {
        let mut by_warehouse: Vec<QuantityShare> = Vec::new();
        let mut by_category: Vec<QuantityShare> = Vec::new();

        for item in items {
            add_share(&mut by_warehouse, &item.warehouse_id, &item.warehouse_name, item.quantity);
            add_share(&mut by_category, &item.category_id, &item.category_name, item.quantity);
        }

        Self {
            item_count: items.len(),
            total_quantity: items.iter().map(|i| u64::from(i.quantity)).sum(),
            low_stock: items
                .iter()
                .filter(|i| i.quantity < threshold)
                .map(|i| LowStockItem {
                    id: i.id.clone(),
                    name: i.name.clone(),
                    quantity: i.quantity,
                })
                .collect(),
            by_warehouse,
            by_category,
        }
    }

    /// Stocked quantity for a warehouse (0 if it holds nothing).
    pub fn quantity_in_warehouse(&self, warehouse_id: &RecordId) -> u64 {
        self.by_warehouse
            .iter()
            .find(|s| &s.id == warehouse_id)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }
}

// First-seen order is kept so charts are stable across calls.
fn add_share(shares: &mut Vec<QuantityShare>, id: &RecordId, name: &str, quantity: u32) {
    match shares.iter_mut().find(|s| &s.id == id) {
        Some(s) => s.quantity += u64::from(quantity),
        None => shares.push(QuantityShare {
            id: id.clone(),
            name: name.to_string(),
            quantity: u64::from(quantity),
        }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn item(id: &str, qty: u32, cat: (&str, &str), wh: (&str, &str)) -> InventoryItem {
        InventoryItem {
            id: id.into(),
            name: format!("item {id}"),
            quantity: qty,
            category_id: cat.0.into(),
            category_name: cat.1.into(),
            warehouse_id: wh.0.into(),
            warehouse_name: wh.1.into(),
            location: String::new(),
            last_updated: NaiveDate::from_ymd_opt(2023, 9, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn totals_and_groupings() {
        let elec = ("1", "Electronics");
        let food = ("4", "Food");
        let main = ("1", "Main Storage");
        let cold = ("3", "Cold Storage");
        let items = vec![
            item("1", 150, elec, main),
            item("2", 30, ("2", "Furniture"), main),
            item("4", 300, elec, main),
            item("5", 200, food, cold),
        ];

        let stats = InventoryStats::from_items(&items);
        assert_eq!(stats.item_count, 4);
        assert_eq!(stats.total_quantity, 680);
        assert_eq!(stats.quantity_in_warehouse(&"1".into()), 480);
        assert_eq!(stats.quantity_in_warehouse(&"9".into()), 0);
        assert_eq!(stats.by_category[0].name, "Electronics");
        assert_eq!(stats.by_category[0].quantity, 450);

        let low: Vec<_> = stats.low_stock.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(low, vec!["item 2"]);
    }

    #[test]
    fn empty_inventory() {
        let stats = InventoryStats::from_items(&[]);
        assert_eq!(stats.item_count, 0);
        assert_eq!(stats.total_quantity, 0);
        assert!(stats.by_warehouse.is_empty());
    }
}
