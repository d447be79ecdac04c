use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use logihub_core::{DomainResult, Entity, RecordId, matches_any, require_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    #[default]
    Operational,
    Maintenance,
    Broken,
}

impl EquipmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            EquipmentStatus::Operational => "Operational",
            EquipmentStatus::Maintenance => "Under Maintenance",
            EquipmentStatus::Broken => "Out of Order",
        }
    }
}

/// A piece of warehouse equipment (forklift, conveyor, refrigeration unit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    #[serde(with = "logihub_core::time::date")]
    pub last_maintenance: NaiveDate,
    pub status: EquipmentStatus,
}

impl Entity for Equipment {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipment {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub location: String,
    /// Defaults to the registration date.
    #[serde(default, with = "logihub_core::time::opt_date")]
    pub last_maintenance: Option<NaiveDate>,
    #[serde(default)]
    pub status: EquipmentStatus,
}

impl NewEquipment {
    pub fn into_equipment(self, id: RecordId, today: NaiveDate) -> DomainResult<Equipment> {
        let name = require_text("equipment name", &self.name)?;
        let kind = require_text("equipment type", &self.kind)?;
        Ok(Equipment {
            id,
            name,
            kind,
            location: self.location.trim().to_string(),
            last_maintenance: self.last_maintenance.unwrap_or(today),
            status: self.status,
        })
    }
}

/// Equipment whose name, type or location contains `term`.
pub fn search_equipment<'a>(equipment: &'a [Equipment], term: &str) -> Vec<&'a Equipment> {
    equipment
        .iter()
        .filter(|e| matches_any(term, [e.name.as_str(), e.kind.as_str(), e.location.as_str()]))
        .collect()
}
