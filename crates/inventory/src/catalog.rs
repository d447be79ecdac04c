use serde::{Deserialize, Serialize};

use logihub_core::{DomainError, DomainResult, Entity, RecordId, require_text};

/// Product category an item is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: RecordId,
    pub name: String,
}

impl Entity for Category {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A physical warehouse with a unit capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: RecordId,
    pub name: String,
    pub capacity: u32,
}

impl Entity for Warehouse {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    #[serde(default)]
    pub name: String,
}

impl NewCategory {
    pub fn into_category(self, id: RecordId) -> DomainResult<Category> {
        let name = require_text("category name", &self.name)?;
        Ok(Category { id, name })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWarehouse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capacity: u32,
}

impl NewWarehouse {
    pub fn into_warehouse(self, id: RecordId) -> DomainResult<Warehouse> {
        let name = require_text("warehouse name", &self.name)?;
        if self.capacity == 0 {
            return Err(DomainError::validation("capacity must be greater than 0"));
        }
        Ok(Warehouse {
            id,
            name,
            capacity: self.capacity,
        })
    }
}
