use serde::{Deserialize, Serialize};

use logihub_core::{DomainError, DomainResult, Entity, RecordId, require_id, require_text};
use logihub_inventory::Warehouse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceKind {
    #[default]
    Storage,
    Loading,
    Packaging,
    Office,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceStatus {
    #[default]
    Active,
    Maintenance,
    Inactive,
}

/// A named area inside a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpace {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SpaceKind,
    pub capacity: u32,
    pub warehouse_id: RecordId,
    pub warehouse_name: String,
    pub location: String,
    pub status: SpaceStatus,
}

impl Entity for StorageSpace {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStorageSpace {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: SpaceKind,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub warehouse_id: Option<RecordId>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: SpaceStatus,
}

impl NewStorageSpace {
    pub fn resolve(self, id: RecordId, warehouses: &[Warehouse]) -> DomainResult<StorageSpace> {
        let name = require_text("space name", &self.name)?;
        let warehouse_id = require_id("warehouse", self.warehouse_id.as_ref())?;
        if self.capacity == 0 {
            return Err(DomainError::validation("capacity must be greater than 0"));
        }
        let warehouse = warehouses
            .iter()
            .find(|w| w.id == warehouse_id)
            .ok_or_else(|| DomainError::validation("selected warehouse not found"))?;

        Ok(StorageSpace {
            id,
            name,
            kind: self.kind,
            capacity: self.capacity,
            warehouse_id,
            warehouse_name: warehouse.name.clone(),
            location: self.location.trim().to_string(),
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouses() -> Vec<Warehouse> {
        vec![Warehouse { id: "1".into(), name: "Main Storage".into(), capacity: 2000 }]
    }

    fn form() -> NewStorageSpace {
        NewStorageSpace {
            name: "Bay 4".into(),
            capacity: 100,
            warehouse_id: Some("1".into()),
            location: "North wall".into(),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_with_defaults() {
        let s = form().resolve("SP-1004".into(), &warehouses()).unwrap();
        assert_eq!(s.kind, SpaceKind::Storage);
        assert_eq!(s.status, SpaceStatus::Active);
        assert_eq!(s.warehouse_name, "Main Storage");
    }

    #[test]
    fn validation_order() {
        let mut f = form();
        f.name = String::new();
        f.warehouse_id = None;
        assert_eq!(
            f.resolve("SP-1".into(), &warehouses()).unwrap_err(),
            DomainError::validation("space name is required")
        );

        let mut f = form();
        f.warehouse_id = None;
        assert_eq!(
            f.resolve("SP-1".into(), &warehouses()).unwrap_err(),
            DomainError::validation("warehouse is required")
        );

        let mut f = form();
        f.capacity = 0;
        assert!(f.resolve("SP-1".into(), &warehouses()).is_err());

        let mut f = form();
        f.warehouse_id = Some("9".into());
        assert_eq!(
            f.resolve("SP-1".into(), &warehouses()).unwrap_err(),
            DomainError::validation("selected warehouse not found")
        );
    }

    #[test]
    fn reads_form_json() {
        let f: NewStorageSpace = serde_json::from_str(
            r#"{"name":"Dock","type":"loading","capacity":40,"warehouseId":"1","status":"maintenance"}"#,
        )
        .unwrap();
        let s = f.resolve("SP-1".into(), &warehouses()).unwrap();
        assert_eq!(s.kind, SpaceKind::Loading);
        assert_eq!(s.status, SpaceStatus::Maintenance);
    }
}
