//! Minimal stand-in for the dashboard backend, served by axum on a random port.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Default)]
pub struct Backend {
    pub dzongkhags: Vec<Value>,
    /// `Authorization` header of every dzongkhag request, in order.
    pub auth_headers: Vec<Option<String>>,
    next_id: usize,
}

pub type Shared = Arc<Mutex<Backend>>;

pub const TOKEN: &str = "token-1";

pub fn karma() -> Value {
    json!({ "_id": "u1", "name": "Karma", "cid": "11512000123", "role": "super_admin" })
}

fn record_auth(backend: &mut Backend, headers: &HeaderMap) {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    backend.auth_headers.push(value);
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Dzongkhag not found" })),
    )
}

async fn list_dzongkhags(State(state): State<Shared>, headers: HeaderMap) -> impl IntoResponse {
    let mut backend = state.lock().unwrap();
    record_auth(&mut backend, &headers);
    Json(Value::Array(backend.dzongkhags.clone()))
}

async fn create_dzongkhag(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> impl IntoResponse {
    let mut backend = state.lock().unwrap();
    record_auth(&mut backend, &headers);

    if body["name"].as_str().map_or(true, |n| n.trim().is_empty()) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Name is required" })),
        );
    }

    backend.next_id += 1;
    body["_id"] = json!(format!("d{}", backend.next_id));
    backend.dzongkhags.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn update_dzongkhag(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> impl IntoResponse {
    let mut backend = state.lock().unwrap();
    record_auth(&mut backend, &headers);

    match backend.dzongkhags.iter_mut().find(|d| d["_id"] == json!(id)) {
        Some(existing) => {
            body["_id"] = json!(id);
            body["updatedAt"] = json!("2024-06-05T08:00:00Z");
            *existing = body.clone();
            (StatusCode::OK, Json(body))
        }
        None => not_found(),
    }
}

async fn delete_dzongkhag(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut backend = state.lock().unwrap();
    record_auth(&mut backend, &headers);

    let before = backend.dzongkhags.len();
    backend.dzongkhags.retain(|d| d["_id"] != json!(id));
    if backend.dzongkhags.len() == before {
        return not_found();
    }
    (StatusCode::OK, Json(json!({ "message": "Dzongkhag deleted" })))
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == json!("secret") {
        (
            StatusCode::OK,
            Json(json!({ "token": TOKEN, "user": karma() })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

async fn me(headers: HeaderMap) -> impl IntoResponse {
    let expected = format!("Bearer {}", TOKEN);
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => (StatusCode::OK, Json(karma())),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "jwt expired" })),
        ),
    }
}

/// Answers 200 with a body that is not JSON.
async fn broken_gewogs() -> impl IntoResponse {
    (StatusCode::OK, "<html>maintenance</html>")
}

async fn list_users() -> impl IntoResponse {
    Json(json!([karma()]))
}

/// Bind to port 0 and return the api base url.
pub async fn start_backend(state: Shared) -> String {
    let app = Router::new()
        .route("/api/dzongkhags", get(list_dzongkhags).post(create_dzongkhag))
        .route(
            "/api/dzongkhags/:id",
            put(update_dzongkhag).delete(delete_dzongkhag),
        )
        .route("/api/gewogs", get(broken_gewogs))
        .route("/api/users", get(list_users))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}
