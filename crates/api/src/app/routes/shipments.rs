use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use logihub_auth::Permission;
use logihub_core::RecordId;
use logihub_shipments::{DateWindow, NewShipment, ShipmentFilter, ShipmentStatus, StatusCounts};

use crate::app::dto::{ShipmentListQuery, StatusChangeRequest, parse_param};
use crate::app::errors;
use crate::app::routes::common::{CmdAuth, require_read};
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_shipments).post(create_shipment))
        .route("/counts", get(counts))
        .route("/:id/status", post(change_status))
}

/// GET /shipments?status=&window=&search=
pub async fn list_shipments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<ShipmentListQuery>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    let status = match parse_param::<ShipmentStatus>(query.status.as_deref()) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let window = match parse_param::<DateWindow>(query.window.as_deref()) {
        Ok(w) => w.unwrap_or_default(),
        Err(resp) => return resp,
    };
    let filter = ShipmentFilter { status, window, search: query.search.unwrap_or_default() };

    let shipments = services.data.fetch_shipments().await;
    let matching: Vec<_> = filter.apply(&shipments, services.data.now()).into_iter().cloned().collect();
    Json(matching).into_response()
}

pub async fn create_shipment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<NewShipment>,
) -> Response {
    let draft = match CmdAuth::new(body, Permission::SHIPMENTS_WRITE).authorize(&session) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match services.data.add_shipment(draft) {
        Ok(s) => (StatusCode::CREATED, Json(s)).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}

pub async fn counts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    let shipments = services.data.fetch_shipments().await;
    Json(StatusCounts::from_shipments(&shipments)).into_response()
}

/// POST /shipments/:id/status `{ "status": "in_transit" }`
pub async fn change_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<StatusChangeRequest>,
) -> Response {
    let body = match CmdAuth::new(body, Permission::SHIPMENTS_WRITE).authorize(&session) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let status = match body.status.trim().parse::<ShipmentStatus>() {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.data.advance_shipment(&RecordId::from(id), status) {
        Ok(s) => Json(s).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}

