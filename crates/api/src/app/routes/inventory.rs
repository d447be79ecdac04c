use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use logihub_auth::Permission;
use logihub_core::RecordId;
use logihub_inventory::{
    InventoryItemPatch, InventorySortKey, InventoryStats, NewCategory, NewInventoryItem, NewWarehouse, search,
    sort_items,
};

use crate::app::dto::{ListQuery, parse_param};
use crate::app::errors;
use crate::app::routes::common::{CmdAuth, require_read};
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/:id", get(get_item).patch(update_item).delete(delete_item))
        .route("/stats", get(stats))
        .route("/categories", get(list_categories).post(create_category))
        .route("/warehouses", get(list_warehouses).post(create_warehouse))
}

/// GET /inventory/items?search=&sort=&direction=
pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<ListQuery>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    let key = match parse_param::<InventorySortKey>(query.sort.as_deref()) {
        Ok(k) => k,
        Err(resp) => return resp,
    };
    let direction = match query.direction() {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    let items = services.data.fetch_inventory().await;
    let mut found: Vec<_> = search(&items, query.term()).into_iter().cloned().collect();
    if let Some(key) = key {
        sort_items(&mut found, key, direction);
    }
    Json(found).into_response()
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<NewInventoryItem>,
) -> Response {
    let draft = match CmdAuth::new(body, Permission::INVENTORY_WRITE).authorize(&session) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match services.data.add_inventory_item(draft) {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    match services.data.get_inventory_item(&RecordId::from(id)).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<InventoryItemPatch>,
) -> Response {
    let patch = match CmdAuth::new(body, Permission::INVENTORY_WRITE).authorize(&session) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match services.data.update_inventory_item(&RecordId::from(id), &patch) {
        Ok(item) => Json(item).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    let id = match CmdAuth::new(RecordId::from(id), Permission::INVENTORY_DELETE).authorize(&session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.data.delete_inventory_item(&id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}

pub async fn stats(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    let items = services.data.fetch_inventory().await;
    Json(InventoryStats::from_items(&items)).into_response()
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    Json(services.data.fetch_categories().await).into_response()
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<NewCategory>,
) -> Response {
    let draft = match CmdAuth::new(body, Permission::CATALOG_WRITE).authorize(&session) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match services.data.add_category(draft) {
        Ok(c) => (StatusCode::CREATED, Json(c)).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}

pub async fn list_warehouses(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Err(resp) = require_read(&session) {
        return resp;
    }
    Json(services.data.fetch_warehouses().await).into_response()
}

pub async fn create_warehouse(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<NewWarehouse>,
) -> Response {
    let draft = match CmdAuth::new(body, Permission::CATALOG_WRITE).authorize(&session) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match services.data.add_warehouse(draft) {
        Ok(w) => (StatusCode::CREATED, Json(w)).into_response(),
        Err(e) => errors::data_error_to_response(e),
    }
}
