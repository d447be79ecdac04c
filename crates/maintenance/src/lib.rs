//! Maintenance domain: warehouse equipment and the maintenance tasks
//! scheduled against it.

pub mod equipment;
pub mod summary;
pub mod task;

pub use equipment::{Equipment, EquipmentStatus, NewEquipment, search_equipment};
pub use summary::{EquipmentCounts, TaskCounts, completed_tasks, open_tasks};
pub use task::{
    MaintenanceKind, MaintenanceStatus, MaintenanceTask, NewMaintenanceTask, TaskFilter,
    TaskPriority, UNKNOWN_EQUIPMENT,
};
