//! Axum-based HTTP server implementation for gemini-relay.
//!
//! This module sets up the HTTP server, configures the single `/operation`
//! route and attaches the middleware every response goes through.
//!
//! # Components
//!
//! - `handlers`: The operation, preflight and method-not-allowed handlers.
//! - `middleware`: Request ID tracking and the fixed CORS response headers.
//! - `routes`: The router configuration and shared application state.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{bind_listener, create_router, AppState};
