use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;

use logihub_auth::Permission;
use logihub_core::RecordId;
use logihub_maintenance::{
    EquipmentCounts, MaintenanceStatus, NewEquipment, NewMaintenanceTask, TaskCounts, TaskFilter, search_equipment,
};

use crate::app::dto::{ListQuery, StatusChangeRequest, TaskListQuery, parse_param};
use crate::app::errors;
use crate::app::routes::common::{CmdAuth, require_read};
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/equipment", get(list_equipment).post(create_equipment))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/:id/status", post(change_task_status))
        .route("/summary", get(summary))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSummary {
    pub tasks: TaskCounts,
    pub equipment: EquipmentCounts,
    pub operational_percent: u32,
}

pub async fn list_equipment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<ListQuery>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    let equipment = services.data.fetch_equipment().await;
    let found: Vec<_> = search_equipment(&equipment, query.term()).into_iter().cloned().collect();
    Json(found).into_response()
}

pub async fn create_equipment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<NewEquipment>,
) -> Response {
    let draft = match CmdAuth::new(body, Permission::MAINTENANCE_WRITE).authorize(&session) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match services.data.add_equipment(draft) {
        Ok(e) => (StatusCode::CREATED, Json(e)).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}

/// GET /maintenance/tasks?status=&search=
pub async fn list_tasks(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<TaskListQuery>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    let status = match parse_param::<MaintenanceStatus>(query.status.as_deref()) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let filter = TaskFilter { status, search: query.search.unwrap_or_default() };
    let tasks = services.data.fetch_maintenance_tasks().await;
    let matching: Vec<_> = filter.apply(&tasks).into_iter().cloned().collect();
    Json(matching).into_response()
}

pub async fn create_task(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<NewMaintenanceTask>,
) -> Response {
    let draft = match CmdAuth::new(body, Permission::MAINTENANCE_WRITE).authorize(&session) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match services.data.add_maintenance_task(draft) {
        Ok(t) => (StatusCode::CREATED, Json(t)).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}

pub async fn change_task_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<StatusChangeRequest>,
) -> Response {
    let body = match CmdAuth::new(body, Permission::MAINTENANCE_WRITE).authorize(&session) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let status = match body.status.trim().parse::<MaintenanceStatus>() {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.data.set_task_status(&RecordId::from(id), status) {
        Ok(t) => Json(t).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}

pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    let (tasks, equipment) = tokio::join!(services.data.fetch_maintenance_tasks(), services.data.fetch_equipment());
    let equipment = EquipmentCounts::from_equipment(&equipment);
    Json(MaintenanceSummary {
        tasks: TaskCounts::from_tasks(&tasks),
        operational_percent: equipment.operational_percent(),
        equipment,
    })
    .into_response()
}
