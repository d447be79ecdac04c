use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    response::{IntoResponse, Response},
};

use logihub_performance::DashboardOverview;

use crate::app::routes::common::require_read;
use crate::app::services::AppServices;
use crate::context::SessionContext;

/// GET /dashboard: summary cards and the three overview charts.
pub async fn overview(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    let data = &services.data;
    let (inventory, warehouses, shipments, equipment, tasks) = tokio::join!(
        data.fetch_inventory(),
        data.fetch_warehouses(),
        data.fetch_shipments(),
        data.fetch_equipment(),
        data.fetch_maintenance_tasks(),
    );
    Json(DashboardOverview::compute(&inventory, &warehouses, &shipments, &equipment, &tasks)).into_response()
}
