use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;

use logihub_auth::Permission;
use logihub_core::SortDirection;
use logihub_space::{
    NewStorageSpace, SpaceTotals, UtilizationBand, UtilizationSortKey, WarehouseUtilization, sort_utilization,
    utilization,
};

use crate::app::dto::{UtilizationQuery, parse_param};
use crate::app::errors;
use crate::app::routes::common::{CmdAuth, require_read};
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/utilization", get(warehouse_utilization))
        .route("/spaces", get(list_spaces).post(create_space))
}

#[derive(Debug, Serialize)]
pub struct UtilizationView {
    pub warehouses: Vec<WarehouseUtilization>,
    /// Over all warehouses, regardless of the band filter.
    pub totals: SpaceTotals,
}

/// GET /space/utilization?band=&sort=&direction=
pub async fn warehouse_utilization(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<UtilizationQuery>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    let parsed = parse_param::<UtilizationBand>(query.band.as_deref()).and_then(|band| {
        let key = parse_param::<UtilizationSortKey>(query.sort.as_deref())?;
        let direction = parse_param::<SortDirection>(query.direction.as_deref())?;
        Ok((band.unwrap_or_default(), key.unwrap_or_default(), direction.unwrap_or_default()))
    });
    let (band, key, direction) = match parsed {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let (warehouses, inventory) = tokio::join!(services.data.fetch_warehouses(), services.data.fetch_inventory());
    let rows = utilization(&warehouses, &inventory);
    let totals = SpaceTotals::from_rows(&rows);

    let mut visible: Vec<_> = rows.into_iter().filter(|r| band.admits(r.percent_used)).collect();
    sort_utilization(&mut visible, key, direction);
    Json(UtilizationView { warehouses: visible, totals }).into_response()
}

pub async fn list_spaces(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    Json(services.data.fetch_spaces()).into_response()
}

pub async fn create_space(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<NewStorageSpace>,
) -> Response {
    let draft = match CmdAuth::new(body, Permission::SPACE_WRITE).authorize(&session) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match services.data.add_storage_space(draft) {
        Ok(s) => (StatusCode::CREATED, Json(s)).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}
