//! In-process stand-in for the RBAC backend.
//!
//! Mirrors the backend's routes and error shapes closely enough to drive the
//! client end to end, and records every request it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use warden_client::ApiClient;

pub const PASSWORD: &str = "secret";
pub const GOOGLE_ID_TOKEN: &str = "good-id-token";

const STAMP: &str = "2024-01-01T00:00:00Z";

/// Fixed accounts: (email, token, user record).
fn accounts() -> Vec<(&'static str, &'static str, Value)> {
    vec![
        (
            "admin@example.com",
            "admin-token",
            json!({
                "id": "u-admin",
                "email": "admin@example.com",
                "name": "Ada Admin",
                "role": "admin",
                "permissions": ["all_permissions"],
            }),
        ),
        (
            "manager@example.com",
            "manager-token",
            json!({
                "id": "u-manager",
                "email": "manager@example.com",
                "fullName": "Max Manager",
                "roles": ["user-manager"],
                "permissions": ["manage_users"],
            }),
        ),
        (
            "viewer@example.com",
            "viewer-token",
            json!({
                "id": "u-viewer",
                "email": "viewer@example.com",
                "role": "viewer",
                "permissions": ["view_reports"],
            }),
        ),
    ]
}

#[derive(Default)]
struct Data {
    users: Vec<Value>,
    roles: Vec<Value>,
    permissions: Vec<Value>,
    requests: Vec<String>,
    last_user_update: Option<Value>,
    next_id: u64,
}

impl Data {
    fn seeded() -> Self {
        let users = accounts().into_iter().map(|(_, _, user)| user).collect();
        let roles = vec![
            json!({ "id": 1, "name": "admin", "description": "Everything", "permissions": ["all_permissions"], "createdAt": STAMP }),
            json!({ "id": 2, "name": "viewer", "permissions": ["view_reports"], "createdAt": STAMP }),
        ];
        let permissions = [
            "manage_users",
            "manage_roles",
            "manage_permissions",
            "view_reports",
            "create_reports",
            "edit_invoices",
        ]
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": i as u64 + 1, "name": name, "createdAt": STAMP }))
        .collect();

        Self {
            users,
            roles,
            permissions,
            next_id: 100,
            ..Self::default()
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone)]
struct Backend(Arc<Mutex<Data>>);

impl Backend {
    fn lock(&self) -> MutexGuard<'_, Data> {
        self.0.lock().unwrap()
    }
}

pub struct TestServer {
    pub base_url: String,
    backend: Backend,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let backend = Backend(Arc::new(Mutex::new(Data::seeded())));
        let app = router(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, backend, handle }
    }

    pub fn api(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }

    /// Every request so far as `"METHOD /path"`.
    pub fn requests(&self) -> Vec<String> {
        self.backend.lock().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.backend.lock().requests.clear();
    }

    /// Overwrite a stored permission's description behind the client's back.
    pub fn set_permission_description(&self, name: &str, description: &str) {
        let mut data = self.backend.lock();
        if let Some(record) = data.permissions.iter_mut().find(|p| p["name"] == name) {
            record["description"] = json!(description);
        }
    }

    pub fn last_user_update(&self) -> Option<Value> {
        self.backend.lock().last_user_update.clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn router(backend: Backend) -> Router {
    Router::new()
        .route("/users/login", post(login))
        .route("/users/google-login", post(google_login))
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/roles", get(list_roles).post(create_role))
        .route("/roles/:id", get(get_role).put(update_role).delete(delete_role))
        .route("/permissions", get(list_permissions).post(create_permission))
        .route(
            "/permissions/:id",
            get(get_permission).put(update_permission).delete(delete_permission),
        )
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend)
}

async fn record(State(backend): State<Backend>, req: Request, next: Next) -> Response {
    let line = format!("{} {}", req.method(), req.uri().path());
    backend.lock().requests.push(line);
    next.run(req).await
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(t) if accounts().iter().any(|(_, tok, _)| *tok == t) => Ok(()),
        _ => Err(message(StatusCode::UNAUTHORIZED, "Unauthorized")),
    }
}

fn str_field<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn position(items: &[Value], key: &str, id: &str) -> Option<usize> {
    items.iter().position(|item| match &item[key] {
        Value::String(s) => s == id,
        Value::Number(n) => n.to_string() == id,
        _ => false,
    })
}

// ─────────────────────────────────────────────────────────────────────────
// Authentication
// ─────────────────────────────────────────────────────────────────────────

async fn login(Json(body): Json<Value>) -> Response {
    let email = str_field(&body, "email");
    let password = str_field(&body, "password");

    accounts()
        .into_iter()
        .find(|(e, _, _)| *e == email && password == PASSWORD)
        .map(|(_, token, user)| Json(json!({ "token": token, "user": user })).into_response())
        .unwrap_or_else(|| message(StatusCode::UNAUTHORIZED, "Invalid credentials"))
}

async fn google_login(Json(body): Json<Value>) -> Response {
    if str_field(&body, "idToken") != GOOGLE_ID_TOKEN {
        return message(StatusCode::UNAUTHORIZED, "Invalid Google token");
    }
    let (_, token, user) = accounts().remove(0);
    Json(json!({ "token": token, "user": user })).into_response()
}

// ─────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────

async fn list_users(State(b): State<Backend>, headers: HeaderMap) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    Json(Value::Array(b.lock().users.clone())).into_response()
}

async fn get_user(State(b): State<Backend>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let data = b.lock();
    match position(&data.users, "id", &id) {
        Some(i) => Json(data.users[i].clone()).into_response(),
        None => message(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn create_user(State(b): State<Backend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let mut data = b.lock();
    let email = str_field(&body, "email").to_string();
    if data.users.iter().any(|u| u["email"] == email.as_str()) {
        return message(StatusCode::CONFLICT, "Email already exists");
    }

    let id = format!("u-{}", data.next_id());
    let user = json!({
        "id": id,
        "email": email,
        "name": str_field(&body, "name"),
        "role": str_field(&body, "role"),
        "permissions": [],
    });
    data.users.push(user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn update_user(
    State(b): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let mut data = b.lock();
    data.last_user_update = Some(body.clone());

    let Some(i) = position(&data.users, "id", &id) else {
        return message(StatusCode::NOT_FOUND, "User not found");
    };
    for key in ["email", "name", "role"] {
        data.users[i][key] = body[key].clone();
    }
    Json(data.users[i].clone()).into_response()
}

async fn delete_user(State(b): State<Backend>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let mut data = b.lock();
    match position(&data.users, "id", &id) {
        Some(i) => {
            data.users.remove(i);
            StatusCode::NO_CONTENT.into_response()
        }
        None => message(StatusCode::NOT_FOUND, "User not found"),
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Roles (unknown ids answer with a plain-text body)
// ─────────────────────────────────────────────────────────────────────────

async fn list_roles(State(b): State<Backend>, headers: HeaderMap) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    Json(Value::Array(b.lock().roles.clone())).into_response()
}

async fn get_role(State(b): State<Backend>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let data = b.lock();
    match position(&data.roles, "id", &id) {
        Some(i) => Json(data.roles[i].clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "role not found").into_response(),
    }
}

fn role_from(id: u64, body: &Value) -> Value {
    let mut role = json!({
        "id": id,
        "name": str_field(body, "name"),
        "permissions": body.get("permissions").cloned().unwrap_or_else(|| json!([])),
        "createdAt": STAMP,
        "updatedAt": STAMP,
    });
    if let Some(description) = body.get("description") {
        role["description"] = description.clone();
    }
    role
}

async fn create_role(State(b): State<Backend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let mut data = b.lock();
    if data.roles.iter().any(|r| r["name"] == body["name"]) {
        return (StatusCode::CONFLICT, Json(json!({ "error": "duplicate_role" }))).into_response();
    }
    let id = data.next_id();
    let role = role_from(id, &body);
    data.roles.push(role.clone());
    (StatusCode::CREATED, Json(role)).into_response()
}

async fn update_role(
    State(b): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let mut data = b.lock();
    let Some(i) = position(&data.roles, "id", &id) else {
        return (StatusCode::NOT_FOUND, "role not found").into_response();
    };
    // Partial update: only fields present in the body change.
    for key in ["name", "description", "permissions"] {
        if let Some(value) = body.get(key) {
            data.roles[i][key] = value.clone();
        }
    }
    data.roles[i]["updatedAt"] = json!(STAMP);
    StatusCode::NO_CONTENT.into_response()
}

async fn delete_role(State(b): State<Backend>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let mut data = b.lock();
    match position(&data.roles, "id", &id) {
        Some(i) => {
            data.roles.remove(i);
            StatusCode::NO_CONTENT.into_response()
        }
        None => (StatusCode::NOT_FOUND, "role not found").into_response(),
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Permissions (errors carry JSON without a message; creation answers without
// a body)
// ─────────────────────────────────────────────────────────────────────────

fn no_such_permission() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not_found" }))).into_response()
}

async fn list_permissions(State(b): State<Backend>, headers: HeaderMap) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    Json(Value::Array(b.lock().permissions.clone())).into_response()
}

async fn get_permission(State(b): State<Backend>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let data = b.lock();
    match position(&data.permissions, "id", &id) {
        Some(i) => Json(data.permissions[i].clone()).into_response(),
        None => no_such_permission(),
    }
}

async fn create_permission(State(b): State<Backend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let mut data = b.lock();
    if data.permissions.iter().any(|p| p["name"] == body["name"]) {
        return message(StatusCode::CONFLICT, "Permission already exists");
    }
    let id = data.next_id();
    let mut record = json!({ "id": id, "name": str_field(&body, "name"), "createdAt": STAMP });
    if let Some(description) = body.get("description") {
        record["description"] = description.clone();
    }
    data.permissions.push(record);
    StatusCode::CREATED.into_response()
}

async fn update_permission(
    State(b): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let mut data = b.lock();
    let Some(i) = position(&data.permissions, "id", &id) else {
        return no_such_permission();
    };
    data.permissions[i]["name"] = body["name"].clone();
    if let Some(description) = body.get("description") {
        data.permissions[i]["description"] = description.clone();
    }
    data.permissions[i]["updatedAt"] = json!(STAMP);
    Json(data.permissions[i].clone()).into_response()
}

async fn delete_permission(State(b): State<Backend>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(r) = bearer(&headers) {
        return r;
    }
    let mut data = b.lock();
    match position(&data.permissions, "id", &id) {
        Some(i) => {
            data.permissions.remove(i);
            StatusCode::NO_CONTENT.into_response()
        }
        None => no_such_permission(),
    }
}
