//! Chart series for the performance view.

use serde::{Deserialize, Serialize};

use logihub_core::DomainError;
use logihub_inventory::{InventoryItem, Warehouse};
use logihub_maintenance::{MaintenanceTask, TaskCounts};
use logihub_space::utilization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "1year")]
    OneYear,
}

impl TimeRange {
    /// Number of trailing monthly points the range covers.
    pub fn months(self) -> usize {
        match self {
            TimeRange::OneMonth => 1,
            TimeRange::ThreeMonths => 3,
            TimeRange::SixMonths => 6,
            TimeRange::OneYear => 12,
        }
    }
}

impl core::str::FromStr for TimeRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1month" => Ok(Self::OneMonth),
            "3months" => Ok(Self::ThreeMonths),
            "" | "6months" => Ok(Self::SixMonths),
            "1year" => Ok(Self::OneYear),
            other => Err(DomainError::validation(format!("unknown time range '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyInventory {
    pub month: &'static str,
    pub turnover: f64,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDelivery {
    pub month: &'static str,
    pub on_time: u32,
    pub late: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationPoint {
    pub warehouse: String,
    pub utilization: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownSlice {
    pub status: &'static str,
    pub value: u32,
}

/// Twelve months ending with the current month, oldest first.
const INVENTORY_HISTORY: [MonthlyInventory; 12] = [
    MonthlyInventory { month: "Jul", turnover: 2.0, value: 171_000 },
    MonthlyInventory { month: "Aug", turnover: 2.1, value: 168_000 },
    MonthlyInventory { month: "Sep", turnover: 1.9, value: 166_000 },
    MonthlyInventory { month: "Oct", turnover: 2.2, value: 161_000 },
    MonthlyInventory { month: "Nov", turnover: 2.4, value: 158_000 },
    MonthlyInventory { month: "Dec", turnover: 2.6, value: 149_000 },
    MonthlyInventory { month: "Jan", turnover: 2.3, value: 152_000 },
    MonthlyInventory { month: "Feb", turnover: 2.5, value: 145_000 },
    MonthlyInventory { month: "Mar", turnover: 2.8, value: 138_000 },
    MonthlyInventory { month: "Apr", turnover: 3.1, value: 130_000 },
    MonthlyInventory { month: "May", turnover: 3.4, value: 125_000 },
    MonthlyInventory { month: "Jun", turnover: 3.6, value: 120_000 },
];

const DELIVERY_HISTORY: [MonthlyDelivery; 12] = [
    MonthlyDelivery { month: "Jul", on_time: 84, late: 16 },
    MonthlyDelivery { month: "Aug", on_time: 86, late: 14 },
    MonthlyDelivery { month: "Sep", on_time: 83, late: 17 },
    MonthlyDelivery { month: "Oct", on_time: 87, late: 13 },
    MonthlyDelivery { month: "Nov", on_time: 89, late: 11 },
    MonthlyDelivery { month: "Dec", on_time: 82, late: 18 },
    MonthlyDelivery { month: "Jan", on_time: 88, late: 12 },
    MonthlyDelivery { month: "Feb", on_time: 85, late: 15 },
    MonthlyDelivery { month: "Mar", on_time: 90, late: 10 },
    MonthlyDelivery { month: "Apr", on_time: 92, late: 8 },
    MonthlyDelivery { month: "May", on_time: 94, late: 6 },
    MonthlyDelivery { month: "Jun", on_time: 95, late: 5 },
];

/// Last `n` entries of `history`; the whole history when it is shorter.
fn trailing<T: Copy>(history: &[T], n: usize) -> Vec<T> {
    history[history.len().saturating_sub(n)..].to_vec()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSeries {
    pub range: TimeRange,
    pub inventory: Vec<MonthlyInventory>,
    pub shipments: Vec<MonthlyDelivery>,
    pub space_utilization: Vec<UtilizationPoint>,
    pub maintenance: Vec<BreakdownSlice>,
}

impl PerformanceSeries {
    pub fn compute(
        range: TimeRange,
        warehouses: &[Warehouse],
        inventory: &[InventoryItem],
        tasks: &[MaintenanceTask],
    ) -> Self {
        let space_utilization = utilization(warehouses, inventory)
            .into_iter()
            .map(|row| UtilizationPoint { warehouse: row.name, utilization: row.percent_used })
            .collect();

        Self {
            range,
            inventory: trailing(&INVENTORY_HISTORY, range.months()),
            shipments: trailing(&DELIVERY_HISTORY, range.months()),
            space_utilization,
            maintenance: maintenance_breakdown(tasks),
        }
    }
}

/// Task status shares in whole percent. Empty when there are no tasks.
pub fn maintenance_breakdown(tasks: &[MaintenanceTask]) -> Vec<BreakdownSlice> {
    let counts = TaskCounts::from_tasks(tasks);
    if counts.all == 0 {
        return Vec::new();
    }
    let pct = |n: usize| ((n as f64 / counts.all as f64) * 100.0).round() as u32;
    vec![
        BreakdownSlice { status: "Completed", value: pct(counts.completed) },
        BreakdownSlice { status: "In Progress", value: pct(counts.in_progress) },
        BreakdownSlice { status: "Pending", value: pct(counts.pending) },
    ]
}
