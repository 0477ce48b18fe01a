//! HTTP server implementation using Axum.

use crate::handler::{
    handle_component_get, handle_component_options, handle_component_root_get, handle_health,
};
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use widgetbay_core::{AssetConfig, ComponentRegistry};

/// Host-wide switches that affect every response.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerOptions {
    /// Add `Access-Control-Allow-Origin: *` to every response.
    pub allow_cross_origin: bool,
}

/// Application state shared across handlers.
pub struct AppState {
    /// Component registry used to resolve bundle directories
    pub registry: Arc<ComponentRegistry>,
    pub options: ServerOptions,
}

/// Build the router serving component bundles under the asset route prefix.
pub fn build_router(state: Arc<AppState>) -> Router {
    // The wildcard does not match an empty tail, so the bare prefix gets its
    // own routes.
    let root_route = format!("/{}", AssetConfig::ROUTE_PREFIX);
    let root_slash_route = format!("/{}/", AssetConfig::ROUTE_PREFIX);
    let component_route = format!("/{}/*path", AssetConfig::ROUTE_PREFIX);
    let allow_cross_origin = state.options.allow_cross_origin;

    let app = Router::new()
        .route("/health", get(handle_health))
        .route(
            &root_route,
            get(handle_component_root_get).options(handle_component_options),
        )
        .route(
            &root_slash_route,
            get(handle_component_root_get).options(handle_component_options),
        )
        .route(
            &component_route,
            get(handle_component_get).options(handle_component_options),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if allow_cross_origin {
        app.layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
    } else {
        app
    }
}

/// Start the component HTTP server.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(
    registry: Arc<ComponentRegistry>,
    options: ServerOptions,
    host: &str,
    port: u16,
) -> anyhow::Result<SocketAddr> {
    let state = Arc::new(AppState { registry, options });
    let app = build_router(state);

    // Parse the address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    // Bind to the address
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    // Spawn the server in the background
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    Ok(actual_addr)
}
