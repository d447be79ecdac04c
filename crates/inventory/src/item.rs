use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use logihub_core::{DomainError, DomainResult, Entity, RecordId, require_id, require_text};

use crate::catalog::{Category, Warehouse};

/// A stocked item.
///
/// Category and warehouse names are denormalized onto the item so list views
/// never need a join; they are re-resolved whenever the referenced id changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: RecordId,
    pub name: String,
    pub quantity: u32,
    pub category_id: RecordId,
    pub category_name: String,
    pub warehouse_id: RecordId,
    pub warehouse_name: String,
    pub location: String,
    #[serde(with = "logihub_core::time::timestamp")]
    pub last_updated: NaiveDateTime,
}

impl Entity for InventoryItem {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Submitted item form (everything except `id` and `lastUpdated`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub category_id: Option<RecordId>,
    #[serde(default)]
    pub warehouse_id: Option<RecordId>,
    #[serde(default)]
    pub location: String,
}

/// A validated item draft with its references resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    pub name: String,
    pub quantity: u32,
    pub category: Category,
    pub warehouse: Warehouse,
    pub location: String,
}

impl NewInventoryItem {
    /// Validate the draft and resolve its category and warehouse.
    ///
    /// Checks run in form order: name, category, warehouse, then existence of
    /// both references.
    pub fn resolve(&self, categories: &[Category], warehouses: &[Warehouse]) -> DomainResult<ResolvedItem> {
        let name = require_text("item name", &self.name)?;
        let category_id = require_id("category", self.category_id.as_ref())?;
        let warehouse_id = require_id("warehouse", self.warehouse_id.as_ref())?;

        let category = categories.iter().find(|c| c.id == category_id);
        let warehouse = warehouses.iter().find(|w| w.id == warehouse_id);

        match (category, warehouse) {
            (Some(category), Some(warehouse)) => Ok(ResolvedItem {
                name,
                quantity: self.quantity,
                category: category.clone(),
                warehouse: warehouse.clone(),
                location: self.location.trim().to_string(),
            }),
            _ => Err(DomainError::validation("selected category or warehouse not found")),
        }
    }
}

impl InventoryItem {
    pub fn create(id: RecordId, resolved: ResolvedItem, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: resolved.name,
            quantity: resolved.quantity,
            category_id: resolved.category.id,
            category_name: resolved.category.name,
            warehouse_id: resolved.warehouse.id,
            warehouse_name: resolved.warehouse.name,
            location: resolved.location,
            last_updated: now,
        }
    }

    /// Produce the replacement record for a partial update.
    pub fn apply_update(
        &self,
        patch: &InventoryItemPatch,
        categories: &[Category],
        warehouses: &[Warehouse],
        now: NaiveDateTime,
    ) -> DomainResult<InventoryItem> {
        let mut next = self.clone();

        if let Some(name) = &patch.name {
            next.name = require_text("item name", name)?;
        }
        if let Some(quantity) = patch.quantity {
            next.quantity = quantity;
        }
        if let Some(location) = &patch.location {
            next.location = location.trim().to_string();
        }
        if let Some(category_id) = &patch.category_id {
            let category = categories
                .iter()
                .find(|c| &c.id == category_id)
                .ok_or_else(|| DomainError::validation("selected category or warehouse not found"))?;
            next.category_id = category.id.clone();
            next.category_name = category.name.clone();
        }
        if let Some(warehouse_id) = &patch.warehouse_id {
            let warehouse = warehouses
                .iter()
                .find(|w| &w.id == warehouse_id)
                .ok_or_else(|| DomainError::validation("selected category or warehouse not found"))?;
            next.warehouse_id = warehouse.id.clone();
            next.warehouse_name = warehouse.name.clone();
        }

        next.last_updated = now;
        Ok(next)
    }
}

/// Partial update of an item; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemPatch {
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub category_id: Option<RecordId>,
    pub warehouse_id: Option<RecordId>,
    pub location: Option<String>,
}
