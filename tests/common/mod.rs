//! Common test utilities and fixtures.
//!
//! Provides an in-memory mock of the storage service speaking the four
//! endpoints the console consumes, bound to an ephemeral port, plus failure
//! toggles so tests can exercise the error paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use lsm_console::{Config, Console};

/// Shared state of the mock storage service.
#[derive(Clone, Default)]
pub struct ServiceState {
    data: Arc<Mutex<BTreeMap<String, String>>>,
    /// When set, /stats answers 500 with an error body.
    pub fail_stats: Arc<AtomicBool>,
    /// When set, /stats answers 200 with an empty body (fields unknown).
    pub omit_stats_fields: Arc<AtomicBool>,
    /// When set, /put answers 500 with an error body.
    pub fail_puts: Arc<AtomicBool>,
}

impl ServiceState {
    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        locked(&self.data).len()
    }

    /// Read a stored value directly, bypassing the HTTP surface.
    pub fn value_of(&self, key: &str) -> Option<String> {
        locked(&self.data).get(key).cloned()
    }
}

// Mutex poisoning cannot happen here; handlers never panic while holding it.
fn locked(data: &Arc<Mutex<BTreeMap<String, String>>>) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
    match data.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// A mock storage service on an ephemeral port.
pub struct TestService {
    pub base_url: String,
    pub state: ServiceState,
    handle: tokio::task::JoinHandle<()>,
}

impl TestService {
    /// Bind and serve the mock service.
    pub async fn spawn() -> anyhow::Result<Self> {
        let state = ServiceState::default();
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        })
    }

    /// A console wired to this service with small test-friendly settings.
    pub fn console(&self) -> Console {
        let mut config = Config::default();
        config.service.url = self.base_url.clone();
        config.console.page_size = 10;
        Console::new(&config)
    }

    /// Stop answering; subsequent calls fail at the transport level.
    pub fn shut_down(&self) {
        self.handle.abort();
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A console pointed at a port nothing listens on, for transport-failure
/// tests.
pub fn unreachable_console() -> Console {
    let mut config = Config::default();
    // Reserved port with no listener.
    config.service.url = "http://127.0.0.1:9".to_string();
    Console::new(&config)
}

fn router(state: ServiceState) -> Router {
    Router::new()
        .route("/put", post(put_value))
        .route("/get", get(get_value))
        .route("/stats", get(stats))
        .route("/keys", get(list_keys))
        .with_state(state)
}

#[derive(Deserialize)]
struct PutBody {
    key: Option<String>,
    value: Option<String>,
}

async fn put_value(State(state): State<ServiceState>, Json(body): Json<PutBody>) -> Response {
    if state.fail_puts.load(Ordering::Relaxed) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "injected put failure"})),
        )
            .into_response();
    }
    let (Some(key), Some(value)) = (body.key, body.value) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "key and value are required"})),
        )
            .into_response();
    };
    locked(&state.data).insert(key.clone(), value.clone());
    Json(json!({"status": "ok", "key": key, "value": value})).into_response()
}

#[derive(Deserialize)]
struct GetParams {
    key: Option<String>,
}

async fn get_value(State(state): State<ServiceState>, Query(params): Query<GetParams>) -> Response {
    let Some(key) = params.key else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "key is required"})),
        )
            .into_response();
    };
    match state.value_of(&key) {
        Some(value) => Json(json!({"found": true, "key": key, "value": value})).into_response(),
        None => Json(json!({"found": false, "key": key})).into_response(),
    }
}

async fn stats(State(state): State<ServiceState>) -> Response {
    if state.fail_stats.load(Ordering::Relaxed) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "stats offline"})),
        )
            .into_response();
    }
    if state.omit_stats_fields.load(Ordering::Relaxed) {
        return Json(json!({})).into_response();
    }
    Json(json!({"memtable_size": state.len(), "num_sst_files": 0})).into_response()
}

#[derive(Deserialize)]
struct KeysParams {
    #[serde(default = "one")]
    page: usize,
    #[serde(default = "fifty")]
    per_page: usize,
    q: Option<String>,
}

fn one() -> usize {
    1
}

fn fifty() -> usize {
    50
}

async fn list_keys(State(state): State<ServiceState>, Query(params): Query<KeysParams>) -> Response {
    let filter = params.q.unwrap_or_default();
    let page = params.page.max(1);
    let rows: Vec<serde_json::Value> = locked(&state.data)
        .iter()
        .filter(|(key, _)| filter.is_empty() || key.contains(&filter))
        .skip((page - 1) * params.per_page)
        .take(params.per_page)
        .map(|(key, value)| json!({"key": key, "value": value}))
        .collect();
    Json(json!({"keys": rows, "page": page})).into_response()
}
