//! Performance analytics and the dashboard overview.
//!
//! KPI metrics and monthly history are reference data; utilization and the
//! maintenance breakdown are computed from the live collections.

pub mod dashboard;
pub mod metrics;
pub mod report;
pub mod series;

pub use dashboard::{ChartSlice, DashboardCards, DashboardOverview};
pub use metrics::{PerformanceMetric, Trend, default_kpis};
pub use report::{Department, NewPerformanceReport, PerformanceReport, ReportKind, ReportStatus};
pub use series::{
    BreakdownSlice, MonthlyDelivery, MonthlyInventory, PerformanceSeries, TimeRange, UtilizationPoint,
};
