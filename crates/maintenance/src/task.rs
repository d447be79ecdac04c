use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use logihub_core::{DomainError, DomainResult, Entity, RecordId, matches_any, require_text};

use crate::equipment::Equipment;

/// Name recorded on a task whose equipment id matches nothing on file.
pub const UNKNOWN_EQUIPMENT: &str = "Unknown Equipment";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl MaintenanceStatus {
    pub fn is_open(self) -> bool {
        !matches!(self, MaintenanceStatus::Completed)
    }

    pub fn label(self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "Pending",
            MaintenanceStatus::InProgress => "In Progress",
            MaintenanceStatus::Completed => "Completed",
        }
    }
}

impl core::str::FromStr for MaintenanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::validation(format!("unknown task status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaintenanceKind {
    #[default]
    Preventive,
    Corrective,
    Predictive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    pub id: RecordId,
    pub equipment_id: RecordId,
    pub equipment_name: String,
    #[serde(rename = "type")]
    pub kind: MaintenanceKind,
    pub description: String,
    pub assigned_to: String,
    #[serde(with = "logihub_core::time::date")]
    pub scheduled_date: NaiveDate,
    pub status: MaintenanceStatus,
    pub priority: TaskPriority,
    #[serde(with = "logihub_core::time::date")]
    pub created_at: NaiveDate,
}

impl Entity for MaintenanceTask {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl MaintenanceTask {
    /// Unlike shipments, tasks may move between any two statuses
    /// (a completed task can be reopened).
    pub fn set_status(&self, status: MaintenanceStatus) -> MaintenanceTask {
        let mut updated = self.clone();
        updated.status = status;
        updated
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenanceTask {
    #[serde(default)]
    pub equipment_id: Option<RecordId>,
    #[serde(default, rename = "type")]
    pub kind: MaintenanceKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default, with = "logihub_core::time::opt_date")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub priority: TaskPriority,
}

impl NewMaintenanceTask {
    /// Validate the form and build the task. The id is assigned by the store.
    pub fn resolve(
        self,
        id: RecordId,
        equipment: &[Equipment],
        today: NaiveDate,
    ) -> DomainResult<MaintenanceTask> {
        let equipment_id = logihub_core::require_id("equipment", self.equipment_id.as_ref())?;
        let description = require_text("description", &self.description)?;
        let assigned_to = require_text("assignee", &self.assigned_to)?;
        let scheduled_date = self
            .scheduled_date
            .ok_or_else(|| DomainError::validation("scheduled date is required"))?;

        let equipment_name = equipment
            .iter()
            .find(|e| e.id == equipment_id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| UNKNOWN_EQUIPMENT.to_string());

        Ok(MaintenanceTask {
            id,
            equipment_id,
            equipment_name,
            kind: self.kind,
            description,
            assigned_to,
            scheduled_date,
            status: self.status,
            priority: self.priority,
            created_at: today,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub status: Option<MaintenanceStatus>,
    #[serde(default)]
    pub search: String,
}

impl TaskFilter {
    pub fn matches(&self, task: &MaintenanceTask) -> bool {
        self.status.is_none_or(|s| s == task.status)
            && matches_any(
                &self.search,
                [
                    task.equipment_name.as_str(),
                    task.description.as_str(),
                    task.assigned_to.as_str(),
                ],
            )
    }

    pub fn apply<'a>(&self, tasks: &'a [MaintenanceTask]) -> Vec<&'a MaintenanceTask> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::EquipmentStatus;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn equipment() -> Vec<Equipment> {
        vec![Equipment {
            id: "EQ-1002".into(),
            name: "Conveyor Belt System".into(),
            kind: "Conveyor".into(),
            location: "Main Storage - Loading Area".into(),
            last_maintenance: d("2023-09-01"),
            status: EquipmentStatus::Maintenance,
        }]
    }

    fn form() -> NewMaintenanceTask {
        NewMaintenanceTask {
            equipment_id: Some("EQ-1002".into()),
            description: "Regular inspection and belt adjustment".into(),
            assigned_to: "John Doe".into(),
            scheduled_date: Some(d("2023-09-20")),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_equipment_name_and_defaults() {
        let t = form().resolve("MT-1005".into(), &equipment(), d("2023-09-18")).unwrap();
        assert_eq!(t.equipment_name, "Conveyor Belt System");
        assert_eq!(t.status, MaintenanceStatus::Pending);
        assert_eq!(t.priority, TaskPriority::Medium);
        assert_eq!(t.kind, MaintenanceKind::Preventive);
        assert_eq!(t.created_at, d("2023-09-18"));
    }

    #[test]
    fn unknown_equipment_is_named_as_such() {
        let mut f = form();
        f.equipment_id = Some("EQ-9999".into());
        let t = f.resolve("MT-1005".into(), &equipment(), d("2023-09-18")).unwrap();
        assert_eq!(t.equipment_name, UNKNOWN_EQUIPMENT);
    }

    #[test]
    fn required_fields() {
        let today = d("2023-09-18");
        let mut f = form();
        f.equipment_id = None;
        assert!(matches!(f.resolve("MT-1".into(), &equipment(), today), Err(DomainError::Validation(_))));

        let mut f = form();
        f.assigned_to = " ".into();
        assert_eq!(
            f.resolve("MT-1".into(), &equipment(), today).unwrap_err(),
            DomainError::validation("assignee is required")
        );

        let mut f = form();
        f.scheduled_date = None;
        assert_eq!(
            f.resolve("MT-1".into(), &equipment(), today).unwrap_err(),
            DomainError::validation("scheduled date is required")
        );
    }

    #[test]
    fn any_status_may_be_set() {
        let t = form().resolve("MT-1".into(), &equipment(), d("2023-09-18")).unwrap();
        let done = t.set_status(MaintenanceStatus::Completed);
        let reopened = done.set_status(MaintenanceStatus::Pending);
        assert_eq!(reopened.status, MaintenanceStatus::Pending);
    }

    #[test]
    fn filter_by_status_and_search() {
        let t = form().resolve("MT-1".into(), &equipment(), d("2023-09-18")).unwrap();
        let rows = vec![t.clone(), t.set_status(MaintenanceStatus::Completed)];

        let open = TaskFilter { status: Some(MaintenanceStatus::Pending), search: String::new() };
        assert_eq!(open.apply(&rows).len(), 1);

        let by_person = TaskFilter { status: None, search: "john".into() };
        assert_eq!(by_person.apply(&rows).len(), 2);

        let miss = TaskFilter { status: None, search: "hydraulic".into() };
        assert!(miss.apply(&rows).is_empty());
    }

    #[test]
    fn kind_keeps_capitalized_wire_name() {
        assert_eq!(serde_json::to_string(&MaintenanceKind::Corrective).unwrap(), "\"Corrective\"");
        assert_eq!(
            serde_json::to_string(&MaintenanceStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }
}
