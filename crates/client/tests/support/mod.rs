//! In-process stub of the FinLedger backend for end-to-end client tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use serde_json::{Value, json};

use finledger_client::navigation::ChannelNavigator;
use finledger_client::{ClientConfig, FinLedgerApp, Navigation, SessionStorage};

pub const GOOD_TOKEN: &str = "tok-alice";

#[derive(Clone, Default)]
pub struct Backend {
    /// `Authorization` header of every request that reached a recording
    /// handler, in arrival order.
    seen_auth: Arc<Mutex<Vec<Option<String>>>>,
}

impl Backend {
    pub fn seen_auth(&self) -> Vec<Option<String>> {
        self.seen_auth.lock().unwrap().clone()
    }

    fn record(&self, headers: &HeaderMap) -> Option<String> {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen_auth.lock().unwrap().push(auth.clone());
        auth
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {GOOD_TOKEN}");
        self.record(headers).as_deref() == Some(expected.as_str())
    }
}

pub struct TestServer {
    pub origin: String,
    pub backend: Backend,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let backend = Backend::default();
        let app = axum::Router::new()
            .route("/health", get(health))
            .route("/api/auth/login", post(login))
            .route("/api/accounts", get(list_accounts).post(create_account))
            .route("/api/accounts/:id", delete(delete_account))
            .route("/api/payments", get(list_payments))
            .route("/api/payments/:id/approve", put(approve_payment))
            .route("/api/users/:id", get(get_user))
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let origin = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            origin,
            backend,
            handle,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.origin).unwrap()
    }

    pub fn start_app(
        &self,
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> (FinLedgerApp, tokio::sync::mpsc::UnboundedReceiver<Navigation>) {
        let (nav, rx) = ChannelNavigator::new();
        let app = FinLedgerApp::start(config, storage, Arc::new(nav)).unwrap();
        (app, rx)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn error_body(status: StatusCode, message: &str, data: Value) -> Response {
    (
        status,
        Json(json!({ "code": status.as_u16(), "message": message, "data": data })),
    )
        .into_response()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "UP", "message": "FinLedger backend is running" }))
}

async fn login(Json(body): Json<Value>) -> Response {
    match (body["username"].as_str(), body["password"].as_str()) {
        (Some("alice"), Some("secret")) => Json(json!({
            "token": GOOD_TOKEN,
            "username": "alice",
            "role": "ACCOUNTANT",
            "userId": 3
        }))
        .into_response(),
        _ => error_body(StatusCode::BAD_REQUEST, "invalid username or password", Value::Null),
    }
}

async fn list_accounts(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if !backend.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([
        { "id": 1, "code": "1001", "name": "Cash", "category": "ASSET", "debitAmount": "500.00" },
        { "id": 2, "code": "1002", "name": "Bank", "category": "ASSET", "parentID": 1 }
    ]))
    .into_response()
}

async fn create_account(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.record(&headers);
    error_body(
        StatusCode::BAD_REQUEST,
        "validation failed",
        json!({ "code": "must not be blank" }),
    )
}

async fn delete_account(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(_id): Path<i32>,
) -> StatusCode {
    if backend.authorized(&headers) {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    }
}

/// Always refuses: the signed-in role may not list payments here.
async fn list_payments(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.record(&headers);
    error_body(StatusCode::FORBIDDEN, "access denied", Value::Null)
}

async fn approve_payment(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !backend.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let approver: i32 = query
        .get("approverId")
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    Json(json!({
        "id": id,
        "transactionID": 4,
        "accountID": 2,
        "amount": "120.00",
        "status": "APPROVED",
        "approvedBy": approver
    }))
    .into_response()
}

async fn get_user(State(backend): State<Backend>, headers: HeaderMap, Path(id): Path<i32>) -> Response {
    if !backend.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "id": id,
        "username": "alice",
        "role": "ACCOUNTANT",
        "email": "alice@example.com",
        "createdDate": "2024-03-01T09:30:00"
    }))
    .into_response()
}
