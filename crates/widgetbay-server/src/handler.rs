//! HTTP request handlers.

use crate::server::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use widgetbay_core::{load_asset, AssetConfig, WidgetError};

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Serve one file of a registered component's bundle.
///
/// Any failure, including unknown components, url-backed components and
/// unreadable files, is a 404 with a plain-text diagnostic. A path that does
/// not decode to UTF-8 is reported with its raw, still-encoded form.
pub async fn handle_component_get(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    match path {
        Ok(Path(path)) => serve_asset(&state, &path).await,
        Err(rejection) => {
            let raw = raw_request_path(&uri);
            debug!("Undecodable component path {}: {}", raw, rejection);
            not_found(WidgetError::asset_not_found(raw, "not found"))
        }
    }
}

/// Serve a request naming no component (`/components` or `/components/`).
pub async fn handle_component_root_get(State(state): State<Arc<AppState>>) -> Response {
    serve_asset(&state, "").await
}

async fn serve_asset(state: &AppState, path: &str) -> Response {
    match load_asset(&state.registry, path).await {
        Ok(asset) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, asset.content_type),
                (header::CACHE_CONTROL, asset.cache_control),
            ],
            asset.body,
        )
            .into_response(),
        Err(e) => {
            debug!("Component asset not served: {}", e);
            not_found(e)
        }
    }
}

fn not_found(e: WidgetError) -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        e.to_string(),
    )
        .into_response()
}

/// Request path below the asset route, as sent on the wire.
fn raw_request_path(uri: &Uri) -> &str {
    let path = uri.path().trim_start_matches('/');
    path.strip_prefix(AssetConfig::ROUTE_PREFIX)
        .map(|rest| rest.trim_start_matches('/'))
        .unwrap_or(path)
}

/// OPTIONS handler for preflight CORS checks.
pub async fn handle_component_options() -> StatusCode {
    StatusCode::NO_CONTENT
}
