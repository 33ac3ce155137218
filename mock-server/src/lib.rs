//! Recording fake of the Signaturit v3 REST API.
//!
//! # Design
//! Every request that does not hit the `/_requests` control route is
//! accepted, appended to a shared [`Journal`] and answered from a small
//! table of path rules. Tests inspect the journal to check exactly what a
//! client put on the wire (method, path, query string, headers, body).
//!
//! Response rules, first match wins:
//! - no `Authorization: Bearer ...` header → `401`
//! - a path segment named `missing` → `404` with a vendor error payload
//! - a path segment named `broken` → `200` with a body that is not JSON
//! - a `/download/` path with a segment named `large` → `200` with
//!   [`large_download_body`]
//! - a path containing `/download/` → `200` with [`DOWNLOAD_BODY`]
//!
//! Request bodies are not size limited.
//! - anything else → `200` with an [`Ack`] echoing method and path

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Bytes served by every `/download/` endpoint.
pub const DOWNLOAD_BODY: &[u8] = b"%PDF-1.4 mock";

/// Size of the `large` download, above the 10 MiB default read cap of
/// common HTTP clients.
pub const LARGE_DOWNLOAD_LEN: usize = 11 * 1024 * 1024;

/// Deterministic `LARGE_DOWNLOAD_LEN`-byte body.
pub fn large_download_body() -> Vec<u8> {
    (0..LARGE_DOWNLOAD_LEN).map(|i| (i % 251) as u8).collect()
}

/// A request as seen by the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
    pub content_type: Option<String>,
    /// Body decoded lossily as UTF-8; uploads in tests are text fixtures.
    pub body: String,
}

/// Default JSON answer for requests that match no special rule.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ack {
    pub id: Uuid,
    pub method: String,
    pub path: String,
}

pub type Journal = Arc<RwLock<Vec<RecordedRequest>>>;

pub fn app() -> Router {
    app_with_journal(Journal::default())
}

pub fn app_with_journal(journal: Journal) -> Router {
    Router::new()
        .route("/_requests", get(list_requests).delete(clear_requests))
        .fallback(record)
        .layer(DefaultBodyLimit::disable())
        .with_state(journal)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_journal(listener, Journal::default()).await
}

pub async fn run_with_journal(listener: TcpListener, journal: Journal) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_journal(journal)).await
}

async fn list_requests(State(journal): State<Journal>) -> Json<Vec<RecordedRequest>> {
    Json(journal.read().await.clone())
}

async fn clear_requests(State(journal): State<Journal>) -> StatusCode {
    journal.write().await.clear();
    StatusCode::NO_CONTENT
}

async fn record(
    State(journal): State<Journal>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let entry = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(&headers, header::AUTHORIZATION),
        user_agent: header_value(&headers, header::USER_AGENT),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    tracing::info!(method = %entry.method, path = %entry.path, bytes = body.len(), "recorded request");

    let authorized = entry
        .authorization
        .as_deref()
        .is_some_and(|value| value.starts_with("Bearer "));
    journal.write().await.push(entry);

    if !authorized {
        return error(StatusCode::UNAUTHORIZED, "missing bearer token");
    }
    respond(&method, uri.path())
}

fn respond(method: &Method, path: &str) -> Response {
    if has_segment(path, "missing") {
        return error(StatusCode::NOT_FOUND, "not found");
    }
    if has_segment(path, "broken") {
        return (StatusCode::OK, "<html>upstream hiccup</html>").into_response();
    }
    if path.contains("/download/") && has_segment(path, "large") {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/pdf")],
            large_download_body(),
        )
            .into_response();
    }
    if path.contains("/download/") {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/pdf")],
            DOWNLOAD_BODY,
        )
            .into_response();
    }
    Json(Ack {
        id: Uuid::new_v4(),
        method: method.to_string(),
        path: path.to_string(),
    })
    .into_response()
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "message": message }))).into_response()
}

/// Match a path segment ignoring a trailing `.json` suffix.
fn has_segment(path: &str, name: &str) -> bool {
    path.split('/')
        .any(|segment| segment.trim_end_matches(".json") == name)
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
