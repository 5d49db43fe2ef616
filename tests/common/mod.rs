//! Mock ADS and Google search endpoints served by axum on a random local port.

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const ADS_TOKEN: &str = "test-token";
pub const GOOGLE_KEY: &str = "test-key";
pub const GOOGLE_CX: &str = "test-cx";

#[derive(Default)]
pub struct MockState {
    ads_requests: AtomicUsize,
    google_requests: AtomicUsize,
}

pub struct MockServer {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockServer {
    pub fn ads_url(&self) -> String {
        format!("http://{}/v1/search/query", self.addr)
    }

    pub fn google_url(&self) -> String {
        format!("http://{}/customsearch/v1", self.addr)
    }

    pub fn ads_requests(&self) -> usize {
        self.state.ads_requests.load(Ordering::SeqCst)
    }

    pub fn google_requests(&self) -> usize {
        self.state.google_requests.load(Ordering::SeqCst)
    }

    /// YAML config pointing both services at this server, without pacing
    pub fn config_yaml(&self) -> String {
        format!(
            "ads_token: {}\ngoogle_api_key: {}\ngoogle_cx: {}\nads_api_url: {}\ngoogle_api_url: {}\nads_delay_ms: 0\ngoogle_delay_ms: 0\n",
            ADS_TOKEN,
            GOOGLE_KEY,
            GOOGLE_CX,
            self.ads_url(),
            self.google_url()
        )
    }
}

pub async fn spawn_mock() -> MockServer {
    let state = Arc::new(MockState::default());
    let app = Router::new()
        .route("/v1/search/query", get(ads_handler))
        .route("/customsearch/v1", get(google_handler))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });

    MockServer { addr, state }
}

/// numFound by author; `property:refereed` lowers Vera Rubin's count.
async fn ads_handler(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.ads_requests.fetch_add(1, Ordering::SeqCst);

    let expected_auth = format!("Bearer {}", ADS_TOKEN);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected_auth);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"})));
    }

    if params.get("rows").map(String::as_str) != Some("0") {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "rows must be 0"})));
    }

    let q = params.get("q").cloned().unwrap_or_default();
    let num_found = if q.contains("author:\"Vera Rubin\"") {
        if q.contains("property:refereed") {
            150
        } else {
            180
        }
    } else if q.contains("author:\"Jocelyn Bell Burnell\"") {
        95
    } else if q.contains("author:\"Offline\"") {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "down"})));
    } else if q.contains("author:\"Garbled\"") {
        return (StatusCode::OK, Json(json!({"response": {"docs": []}})));
    } else {
        0
    };

    (
        StatusCode::OK,
        Json(json!({
            "responseHeader": {"status": 0, "params": {"q": q}},
            "response": {"numFound": num_found, "start": 0, "docs": []}
        })),
    )
}

/// totalResults by query; Jocelyn Bell Burnell hits the quota.
async fn google_handler(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.google_requests.fetch_add(1, Ordering::SeqCst);

    let key_ok = params.get("key").map(String::as_str) == Some(GOOGLE_KEY);
    let cx_ok = params.get("cx").map(String::as_str) == Some(GOOGLE_CX);
    if !key_ok || !cx_ok {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"code": 403, "message": "API key not valid"}})),
        );
    }

    let total = match params.get("q").map(String::as_str).unwrap_or_default() {
        "Vera Rubin astronomy" => "20900",
        "Garbled astronomy" => "1500",
        "Offline astronomy" => "42",
        "Jocelyn Bell Burnell astronomy" => {
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({"error": {"code": 429, "message": "Quota exceeded"}})),
            )
        }
        _ => "0",
    };

    (
        StatusCode::OK,
        Json(json!({
            "kind": "customsearch#search",
            "searchInformation": {"searchTime": 0.21, "totalResults": total}
        })),
    )
}
