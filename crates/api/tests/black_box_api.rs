use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use chrono::Duration as ChronoDuration;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::{Value, json};

use logihub_api::app::{AppServices, build_app, router_with};
use logihub_api::config::AppConfig;
use logihub_assistant::{ChatMessage, LlmError, LlmProvider, LlmResponse};
use logihub_auth::Hs256SessionTokens;
use logihub_infra::DataService;

const SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let mut config = AppConfig::default();
        config.session.secret = SecretString::new(SECRET.to_string());
        Self::spawn_router(build_app(&config)).await
    }

    async fn spawn_router(app: Router) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, client: reqwest::Client::new(), handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn login(&self, email: &str, password: &str) -> String {
        let res = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    async fn admin(&self) -> String {
        self.login("admin@logistics.com", "admin123").await
    }

    async fn user(&self) -> String {
        self.login("user@logistics.com", "user123").await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct CannedProvider(Result<&'static str, &'static str>);

#[async_trait]
impl LlmProvider for CannedProvider {
    async fn chat_completion(&self, _messages: Vec<ChatMessage>) -> Result<LlmResponse, LlmError> {
        match self.0 {
            Ok(text) => Ok(LlmResponse { content: text.to_string(), model: Some("canned".into()) }),
            Err(msg) => Err(LlmError::InvalidResponse(msg.to_string())),
        }
    }

    fn provider_name(&self) -> &str {
        "canned"
    }
}

fn services_with(provider: CannedProvider) -> Arc<AppServices> {
    let tokens = Arc::new(Hs256SessionTokens::new(SECRET.as_bytes(), ChronoDuration::minutes(10)));
    Arc::new(AppServices::new(DataService::new(), tokens, Some(Arc::new(provider))))
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = srv.client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

/// Read SSE frames until one with `event: {event}` arrives; returns its data line.
async fn next_event_data(res: &mut reqwest::Response, event: &str) -> Value {
    let marker = format!("event: {event}\n");
    let mut buf = String::new();
    loop {
        let chunk = res.chunk().await.unwrap().expect("stream closed before the event arrived");
        buf.push_str(std::str::from_utf8(&chunk).unwrap());
        while let Some(end) = buf.find("\n\n") {
            let frame: String = buf.drain(..end + 2).collect();
            if frame.contains(&marker) {
                let data = frame
                    .lines()
                    .find_map(|l| l.strip_prefix("data:"))
                    .expect("event without data")
                    .trim();
                return serde_json::from_str(data).unwrap();
            }
        }
    }
}

#[tokio::test]
async fn stream_pushes_change_notices() {
    let srv = TestServer::spawn().await;

    let res = srv.client.get(srv.url("/stream")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let token = srv.admin().await;
    let mut stream = srv.client.get(srv.url("/stream")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(stream.status(), StatusCode::OK);
    assert!(
        stream.headers()["content-type"].to_str().unwrap().starts_with("text/event-stream"),
        "{:?}",
        stream.headers()
    );

    let res = srv
        .client
        .post(srv.url("/inventory/items"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Label Printer", "quantity": 3, "categoryId": "1", "warehouseId": "4" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let notice = tokio::time::timeout(Duration::from_secs(5), next_event_data(&mut stream, "inventory"))
        .await
        .expect("no inventory event within 5s");
    assert_eq!(notice["collection"], "inventory");
    assert_eq!(notice["action"], "created");
    assert_eq!(notice["id"], "6");
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;

    let res = srv.client.get(srv.url("/inventory/items")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized");

    let res = srv
        .client
        .get(srv.url("/dashboard"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let srv = TestServer::spawn().await;
    let res = srv
        .client
        .post(srv.url("/auth/login"))
        .json(&json!({ "email": "admin@logistics.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn session_roundtrip_and_logout() {
    let srv = TestServer::spawn().await;
    let token = srv.user().await;

    let res = srv.client.get(srv.url("/auth/session")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["user"]["name"], "Regular User");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password").is_none());

    let res = srv.client.post(srv.url("/auth/logout")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = srv.client.get(srv.url("/auth/session")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn inventory_lifecycle_create_update_delete() {
    let srv = TestServer::spawn().await;
    let token = srv.admin().await;

    let res = srv
        .client
        .post(srv.url("/inventory/items"))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Desk Lamp",
            "quantity": 40,
            "categoryId": "2",
            "warehouseId": "1",
            "location": "Shelf D-4"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["id"], "6");
    assert_eq!(created["categoryName"], "Furniture");
    assert_eq!(created["warehouseName"], "Main Storage");

    let res = srv
        .client
        .patch(srv.url("/inventory/items/6"))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 75 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["quantity"], 75);

    let res = srv
        .client
        .get(srv.url("/inventory/items?search=lamp"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let found: Vec<Value> = res.json().await.unwrap();
    assert_eq!(found.len(), 1);

    let res = srv
        .client
        .delete(srv.url("/inventory/items/6"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = srv
        .client
        .get(srv.url("/inventory/items/6"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inventory_list_sorts_by_quantity() {
    let srv = TestServer::spawn().await;
    let token = srv.user().await;

    let res = srv
        .client
        .get(srv.url("/inventory/items?sort=quantity&direction=desc"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let items: Vec<Value> = res.json().await.unwrap();
    let quantities: Vec<u64> = items.iter().map(|i| i["quantity"].as_u64().unwrap()).collect();
    assert_eq!(quantities, [500, 300, 200, 150, 30]);

    let res = srv
        .client
        .get(srv.url("/inventory/items?sort=color"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn regular_user_cannot_delete_or_edit_catalog() {
    let srv = TestServer::spawn().await;
    let token = srv.user().await;

    let res = srv
        .client
        .delete(srv.url("/inventory/items/1"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = srv
        .client
        .post(srv.url("/inventory/categories"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Tools" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Still allowed to add stock.
    let res = srv
        .client
        .post(srv.url("/inventory/items"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Tape", "quantity": 5, "categoryId": "5", "warehouseId": "2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn invalid_forms_are_rejected_with_messages() {
    let srv = TestServer::spawn().await;
    let token = srv.admin().await;

    let res = srv
        .client
        .post(srv.url("/inventory/items"))
        .bearer_auth(&token)
        .json(&json!({ "name": "  ", "categoryId": "1", "warehouseId": "1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = srv
        .client
        .post(srv.url("/shipments"))
        .bearer_auth(&token)
        .json(&json!({ "origin": "Main Storage", "items": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "please fill all required fields");
}

#[tokio::test]
async fn shipment_status_moves_forward_only() {
    let srv = TestServer::spawn().await;
    let token = srv.user().await;

    let res = srv
        .client
        .post(srv.url("/shipments"))
        .bearer_auth(&token)
        .json(&json!({
            "origin": "Main Storage",
            "destination": "Harbor Outlet",
            "carrier": "FastShip Inc.",
            "departureDate": "2023-09-21",
            "estimatedArrival": "2023-09-23",
            "items": [{ "itemId": "2", "quantity": 4 }, { "itemId": "", "quantity": 0 }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["id"], "SH-1006");
    assert_eq!(created["status"], "pending");
    assert_eq!(created["items"].as_array().unwrap().len(), 1);
    assert_eq!(created["items"][0]["itemName"], "Office Chair");

    let res = srv
        .client
        .post(srv.url("/shipments/SH-1006/status"))
        .bearer_auth(&token)
        .json(&json!({ "status": "in_transit" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv
        .client
        .post(srv.url("/shipments/SH-1006/status"))
        .bearer_auth(&token)
        .json(&json!({ "status": "pending" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = srv
        .client
        .get(srv.url("/shipments?status=in_transit"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let in_transit: Vec<Value> = res.json().await.unwrap();
    assert_eq!(in_transit.len(), 3);

    let res = srv.client.get(srv.url("/shipments/counts")).bearer_auth(&token).send().await.unwrap();
    let counts: Value = res.json().await.unwrap();
    assert_eq!(counts["all"], 6);
    assert_eq!(counts["inTransit"], 3);
}

#[tokio::test]
async fn maintenance_tasks_and_summary() {
    let srv = TestServer::spawn().await;
    let token = srv.user().await;

    let res = srv
        .client
        .post(srv.url("/maintenance/tasks/MT-1002/status"))
        .bearer_auth(&token)
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv
        .client
        .get(srv.url("/maintenance/tasks?status=pending"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let pending: Vec<Value> = res.json().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], "MT-1003");

    let res = srv.client.get(srv.url("/maintenance/summary")).bearer_auth(&token).send().await.unwrap();
    let summary: Value = res.json().await.unwrap();
    assert_eq!(summary["tasks"]["completed"], 2);
    assert_eq!(summary["equipment"]["total"], 5);
    assert_eq!(summary["operationalPercent"], 60);
}

#[tokio::test]
async fn space_and_performance_views() {
    let srv = TestServer::spawn().await;
    let token = srv.user().await;

    let res = srv
        .client
        .get(srv.url("/space/utilization?sort=percentUsed&direction=desc"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let view: Value = res.json().await.unwrap();
    let rows = view["warehouses"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["name"], "Fashion Warehouse");
    assert_eq!(view["totals"]["totalCapacity"], 6500);

    let res = srv
        .client
        .get(srv.url("/performance/series?range=3months"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let series: Value = res.json().await.unwrap();
    assert_eq!(series["inventory"].as_array().unwrap().len(), 3);

    let res = srv.client.get(srv.url("/performance/metrics")).bearer_auth(&token).send().await.unwrap();
    let metrics: Vec<Value> = res.json().await.unwrap();
    assert_eq!(metrics.len(), 6);

    let res = srv.client.get(srv.url("/dashboard")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let dashboard: Value = res.json().await.unwrap();
    assert_eq!(dashboard["cards"]["totalInventory"], 1180);
}

#[tokio::test]
async fn assistant_answers_from_rules_without_a_model() {
    let srv = TestServer::spawn().await;
    let token = srv.user().await;

    let res = srv
        .client
        .post(srv.url("/assistant/ask"))
        .bearer_auth(&token)
        .json(&json!({ "prompt": "Which items are low on stock?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["source"], "rules");
    assert_eq!(body["topic"], "inventory");

    let res = srv
        .client
        .post(srv.url("/assistant/ask"))
        .bearer_auth(&token)
        .json(&json!({ "prompt": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn assistant_function_without_key_is_500() {
    let srv = TestServer::spawn().await;
    let res = srv
        .client
        .post(srv.url("/functions/ai-assistant"))
        .header("Origin", "http://localhost:5173")
        .json(&json!({ "prompt": "hi", "data": {} }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn assistant_function_relays_model_reply() {
    let srv = TestServer::spawn_router(router_with(services_with(CannedProvider(Ok("## Stock chart"))))).await;

    let res = srv
        .client
        .post(srv.url("/functions/ai-assistant"))
        .json(&json!({ "prompt": "chart stock", "data": { "inventory": [] }, "timestamp": "2023-09-20T10:00:00Z" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["response"], "## Stock chart");
    assert!(body["timestamp"].as_str().is_some());

    // Widget goes through the same model.
    let token = srv.admin().await;
    let res = srv
        .client
        .post(srv.url("/assistant/ask"))
        .bearer_auth(&token)
        .json(&json!({ "prompt": "summarize" }))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["source"], "remote");
}

#[tokio::test]
async fn model_failure_falls_back_for_widget_but_not_function() {
    let srv =
        TestServer::spawn_router(router_with(services_with(CannedProvider(Err("Invalid response structure from OpenAI API")))))
            .await;

    let res = srv
        .client
        .post(srv.url("/functions/ai-assistant"))
        .json(&json!({ "prompt": "chart stock", "data": {} }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid response structure from OpenAI API");

    let token = srv.user().await;
    let res = srv
        .client
        .post(srv.url("/assistant/ask"))
        .bearer_auth(&token)
        .json(&json!({ "prompt": "any broken equipment?" }))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["source"], "rules");
}
