use serde::{Deserialize, Serialize};

use logihub_core::{Entity, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// A headline KPI: `value` in `unit`, with `change` since the previous period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetric {
    pub id: RecordId,
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub change: f64,
    pub trend: Trend,
}

impl Entity for PerformanceMetric {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PerformanceMetric {
    pub fn percent(id: &str, name: &str, value: f64, change: f64) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            value,
            unit: "%".to_string(),
            change,
            trend: if change < 0.0 { Trend::Down } else { Trend::Up },
        }
    }

    /// `97.8%`
    pub fn display_value(&self) -> String {
        format!("{:.1}{}", self.value, self.unit)
    }

    /// `+1.2%` / `-0.4%`
    pub fn display_change(&self) -> String {
        format!("{:+.1}{}", self.change, self.unit)
    }
}

/// The six KPIs shown at the top of the performance view.
pub fn default_kpis() -> Vec<PerformanceMetric> {
    vec![
        PerformanceMetric::percent("1", "Inventory Accuracy", 97.8, 1.2),
        PerformanceMetric::percent("2", "Order Fulfillment Rate", 94.6, 2.5),
        PerformanceMetric::percent("3", "On-Time Delivery", 92.3, 3.1),
        PerformanceMetric::percent("4", "Space Utilization", 78.5, 4.2),
        PerformanceMetric::percent("5", "Equipment Uptime", 95.7, 0.8),
        PerformanceMetric::percent("6", "Labor Efficiency", 88.3, 2.7),
    ]
}
