use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use logihub_auth::Permission;
use logihub_performance::{NewPerformanceReport, PerformanceSeries, TimeRange};

use crate::app::dto::{SeriesQuery, parse_param};
use crate::app::errors;
use crate::app::routes::common::{CmdAuth, require_read};
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/series", get(series))
        .route("/reports", get(list_reports).post(create_report))
}

pub async fn metrics(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    Json(services.data.fetch_metrics()).into_response()
}

/// GET /performance/series?range=1month|3months|6months|1year
pub async fn series(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<SeriesQuery>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    let range = match parse_param::<TimeRange>(query.range.as_deref()) {
        Ok(r) => r.unwrap_or_default(),
        Err(resp) => return resp,
    };
    let (warehouses, inventory, tasks) = tokio::join!(
        services.data.fetch_warehouses(),
        services.data.fetch_inventory(),
        services.data.fetch_maintenance_tasks(),
    );
    Json(PerformanceSeries::compute(range, &warehouses, &inventory, &tasks)).into_response()
}

pub async fn list_reports(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    Json(services.data.fetch_reports()).into_response()
}

pub async fn create_report(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<NewPerformanceReport>,
) -> Response {
    let draft = match CmdAuth::new(body, Permission::REPORTS_WRITE).authorize(&session) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match services.data.add_report(draft) {
        Ok(r) => (StatusCode::CREATED, Json(r)).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}
