use std::str::FromStr;

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use logihub_auth::User;
use logihub_core::{DomainError, SortDirection};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

/// `?search=&sort=&direction=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl ListQuery {
    pub fn term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    pub fn direction(&self) -> Result<SortDirection, Response> {
        Ok(parse_param(self.direction.as_deref())?.unwrap_or_default())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ShipmentListQuery {
    pub status: Option<String>,
    pub window: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UtilizationQuery {
    pub band: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeriesQuery {
    pub range: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

// -------------------------
// Helpers
// -------------------------

/// Parse an optional query value. Absent, blank and `all` read as `None`.
pub fn parse_param<T>(raw: Option<&str>) -> Result<Option<T>, Response>
where
    T: FromStr<Err = DomainError>,
{
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(errors::domain_error_to_response),
    }
}
