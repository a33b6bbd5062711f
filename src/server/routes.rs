// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{method_not_allowed_handler, operation_handler, preflight_handler};
use super::middleware::{cors_header_layers, request_id_layers};
use crate::config::{AppConfig, ServerConfig};
use crate::error::Result;
use crate::gemini::GeminiClient;
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured; operations then fail with 500.
    pub gemini_client: Option<Arc<GeminiClient>>,
}

pub fn create_router(config: &AppConfig) -> Result<Router> {
    let gemini_client = match config.gemini.api_key.clone() {
        Some(api_key) => {
            let client = GeminiClient::new(&config.gemini, api_key)?;
            info!(
                "Relaying to {} (model {})",
                client.base_url(),
                client.model()
            );
            Some(Arc::new(client))
        }
        None => {
            warn!("No API key configured; /operation will answer 500");
            None
        }
    };

    let max_body_bytes = config.server.max_body_bytes;
    let state = AppState { gemini_client };

    let (set_request_id, propagate_request_id) = request_id_layers();
    let (allow_origin, allow_methods, allow_headers) = cors_header_layers();

    let middleware = ServiceBuilder::new()
        .layer(set_request_id)
        .layer(propagate_request_id)
        .layer(TraceLayer::new_for_http())
        .layer(allow_origin)
        .layer(allow_methods)
        .layer(allow_headers)
        .layer(RequestBodyLimitLayer::new(max_body_bytes));

    let app = Router::new()
        .route(
            "/operation",
            post(operation_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        // The limit layer below replaces axum's 2MB multipart default
        .layer(DefaultBodyLimit::disable())
        .layer(middleware)
        .with_state(state);

    Ok(app)
}

/// Bind the listener for `host:port`; hostnames are resolved, IPv6 needs no brackets.
pub async fn bind_listener(config: &ServerConfig) -> Result<TcpListener> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    Ok(listener)
}
