// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, CORS, and shared state for the dashboard API.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use portero_core::PorteroError;

use crate::handlers::{self, GatewayState};

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the dashboard API router.
///
/// The static `/api/orders/done` route is registered alongside the
/// parameterized `/api/orders/{id}`; axum resolves static segments first,
/// so the purge route is never shadowed by the id route.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route(
            "/api/orders",
            post(handlers::create_order)
                .get(handlers::list_orders)
                .delete(handlers::purge_by_status),
        )
        .route("/api/orders/done", delete(handlers::purge_done))
        .route("/api/orders/{id}", delete(handlers::delete_order))
        .route("/api/orders/{id}/status", post(handlers::update_status))
        .route("/api/health", get(|| async { "ok" }))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the gateway HTTP server and serves until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), PorteroError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PorteroError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("dashboard gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| PorteroError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
