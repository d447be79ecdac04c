//! Counts behind the maintenance view's status tabs and summary cards.

use serde::Serialize;

use crate::equipment::{Equipment, EquipmentStatus};
use crate::task::{MaintenanceStatus, MaintenanceTask};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    pub all: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn from_tasks(tasks: &[MaintenanceTask]) -> Self {
        let mut counts = TaskCounts { all: tasks.len(), ..Default::default() };
        for t in tasks {
            match t.status {
                MaintenanceStatus::Pending => counts.pending += 1,
                MaintenanceStatus::InProgress => counts.in_progress += 1,
                MaintenanceStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }

    pub fn open(&self) -> usize {
        self.pending + self.in_progress
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentCounts {
    pub total: usize,
    pub operational: usize,
    pub maintenance: usize,
    pub broken: usize,
}

impl EquipmentCounts {
    pub fn from_equipment(equipment: &[Equipment]) -> Self {
        let mut counts = EquipmentCounts { total: equipment.len(), ..Default::default() };
        for e in equipment {
            match e.status {
                EquipmentStatus::Operational => counts.operational += 1,
                EquipmentStatus::Maintenance => counts.maintenance += 1,
                EquipmentStatus::Broken => counts.broken += 1,
            }
        }
        counts
    }

    /// Share of operational equipment in whole percent; 0 when nothing is registered.
    pub fn operational_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.operational as f64 / self.total as f64) * 100.0).round() as u32
    }
}

pub fn open_tasks(tasks: &[MaintenanceTask]) -> Vec<&MaintenanceTask> {
    tasks.iter().filter(|t| t.status.is_open()).collect()
}

pub fn completed_tasks(tasks: &[MaintenanceTask]) -> Vec<&MaintenanceTask> {
    tasks.iter().filter(|t| !t.status.is_open()).collect()
}
