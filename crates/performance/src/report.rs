use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use logihub_core::{DomainError, DomainResult, Entity, RecordId, require_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Report,
    Kpi,
    Analysis,
    Comparison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    #[default]
    Logistics,
    Inventory,
    Warehouse,
    Shipping,
    Management,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Draft,
    Published,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub department: Department,
    #[serde(with = "logihub_core::time::date")]
    pub start_date: NaiveDate,
    #[serde(with = "logihub_core::time::date")]
    pub end_date: NaiveDate,
    pub status: ReportStatus,
    #[serde(with = "logihub_core::time::date")]
    pub created_at: NaiveDate,
}

impl Entity for PerformanceReport {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerformanceReport {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: ReportKind,
    #[serde(default)]
    pub department: Department,
    #[serde(default, with = "logihub_core::time::opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "logihub_core::time::opt_date")]
    pub end_date: Option<NaiveDate>,
}

impl NewPerformanceReport {
    pub fn validate(self, id: RecordId, today: NaiveDate) -> DomainResult<PerformanceReport> {
        let title = require_text("report title", &self.title)?;
        let (Some(start_date), Some(end_date)) = (self.start_date, self.end_date) else {
            return Err(DomainError::validation("date range is required"));
        };
        if end_date < start_date {
            return Err(DomainError::validation("end date cannot be before start date"));
        }
        Ok(PerformanceReport {
            id,
            title,
            description: self.description.trim().to_string(),
            kind: self.kind,
            department: self.department,
            start_date,
            end_date,
            status: ReportStatus::Draft,
            created_at: today,
        })
    }
}
