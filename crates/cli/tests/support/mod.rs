//! In-process stand-in for the Vault KV v1 HTTP API
#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use url::Url;

pub const TOKEN: &str = "s.test-token";

#[derive(Debug, Clone, Default)]
pub struct FakeVault {
    pub secrets: Arc<Mutex<BTreeMap<String, Value>>>,
    /// Paths that answer every request with a 500
    pub broken: Arc<Mutex<BTreeSet<String>>>,
    /// Raw LIST bodies to hand back instead of the real listing
    pub listings: Arc<Mutex<HashMap<String, Value>>>,
}

impl FakeVault {
    pub fn insert(&self, path: &str, value: Value) {
        self.secrets.lock().unwrap().insert(path.to_string(), value);
    }

    pub fn get(&self, path: &str) -> Option<Value> {
        self.secrets.lock().unwrap().get(path).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.secrets.lock().unwrap().keys().cloned().collect()
    }

    pub fn break_path(&self, path: &str) {
        self.broken.lock().unwrap().insert(path.to_string());
    }

    pub fn override_listing(&self, path: &str, body: Value) {
        self.listings.lock().unwrap().insert(path.to_string(), body);
    }

    /// Serve on an ephemeral local port and return the address to use
    pub async fn spawn(&self) -> Url {
        let app = Router::new()
            .route("/v1/*path", get(handle_get).put(handle_put).delete(handle_delete))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Url::parse(&format!("http://{}", addr)).unwrap()
    }

    fn guard(&self, headers: &HeaderMap, path: &str) -> Option<Response> {
        let authorized = headers
            .get("X-Vault-Token")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == TOKEN)
            .unwrap_or(false);
        if !authorized {
            return Some(
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({"errors": ["permission denied"]})),
                )
                    .into_response(),
            );
        }
        if self.broken.lock().unwrap().contains(path) {
            return Some(
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"errors": ["internal error"]})),
                )
                    .into_response(),
            );
        }
        None
    }
}

async fn handle_get(
    State(vault): State<FakeVault>,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = vault.guard(&headers, &path) {
        return denied;
    }

    if query.get("list").map(String::as_str) == Some("true") {
        if let Some(body) = vault.listings.lock().unwrap().get(&path) {
            return Json(body.clone()).into_response();
        }

        let prefix = format!("{}/", path);
        let mut keys = BTreeSet::new();
        for key in vault.secrets.lock().unwrap().keys() {
            if let Some(relative) = key.strip_prefix(&prefix) {
                match relative.find('/') {
                    Some(pos) => keys.insert(format!("{}/", &relative[..pos])),
                    None => keys.insert(relative.to_string()),
                };
            }
        }
        if keys.is_empty() {
            return (StatusCode::NOT_FOUND, Json(json!({"errors": []}))).into_response();
        }
        return Json(json!({"data": {"keys": keys}})).into_response();
    }

    match vault.get(&path) {
        Some(data) => Json(json!({"data": data, "lease_duration": 2764800})).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"errors": []}))).into_response(),
    }
}

async fn handle_put(
    State(vault): State<FakeVault>,
    Path(path): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = vault.guard(&headers, &path) {
        return denied;
    }
    vault.insert(&path, body);
    StatusCode::NO_CONTENT.into_response()
}

async fn handle_delete(
    State(vault): State<FakeVault>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = vault.guard(&headers, &path) {
        return denied;
    }
    vault.secrets.lock().unwrap().remove(&path);
    StatusCode::NO_CONTENT.into_response()
}
