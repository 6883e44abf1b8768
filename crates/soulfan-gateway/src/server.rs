// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use soulfan_config::model::ServerConfig;
use soulfan_core::{PluginAdapter, SoulfanError};
use soulfan_pipeline::CreationPipeline;
use soulfan_xmtp::ClientRegistry;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<CreationPipeline>,
    pub clients: Arc<ClientRegistry>,
    /// Adapters reported by `/health`.
    pub adapters: Arc<Vec<Arc<dyn PluginAdapter>>>,
    pub auth: AuthConfig,
}

/// Builds the application router.
///
/// `/` and `/health` are public; every other route passes through
/// [`auth_middleware`].
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/create-bot", post(handlers::create_bot))
        .route("/publish-site", post(handlers::publish_site))
        .route("/bots", post(handlers::post_bots))
        .route("/bots/{token_id}", get(handlers::get_bot))
        .route("/address/{token_id}", get(handlers::get_address))
        .route("/blob/{blob_id}", get(handlers::get_blob))
        .route("/xmtp/initialize", post(handlers::xmtp_initialize))
        .route("/xmtp/cleanup/{address}", delete(handlers::xmtp_cleanup))
        .route("/xmtp/active-clients", get(handlers::xmtp_active_clients))
        .route("/xmtp/messages", post(handlers::xmtp_messages))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serves the API until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), SoulfanError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SoulfanError::Transport {
            message: format!("failed to bind server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("server listening on {addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            tracing::info!("server shutting down gracefully");
        })
        .await
        .map_err(|e| SoulfanError::Transport {
            message: format!("server error: {e}"),
            source: Some(Box::new(e)),
        })
}
