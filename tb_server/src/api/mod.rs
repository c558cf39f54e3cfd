//! HTTP/WebSocket API for the time bomb server.
//!
//! # Architecture
//!
//! The API is built with:
//! - **Axum**: Async web framework for HTTP/WebSocket
//! - **Tower**: CORS middleware
//! - **Actor Model**: Each game is owned by a dedicated actor task reached
//!   through the session registry
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /health                                - Health check
//! POST /api/v1/games                          - Create an empty game
//! GET  /api/v1/games/{code}                   - Public game summary
//! GET  /ws?name=<name>[&code=<code>]          - Play over a WebSocket
//! ```

pub mod games;
pub mod websocket;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::json;
use timebomb::SessionRegistry;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers and WebSocket connections.
#[derive(Clone)]
pub struct AppState {
    pub registry: SessionRegistry,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/games", post(games::create_game))
        .route("/games/{code}", get(games::get_game));

    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(websocket::websocket_handler))
        .nest("/api/v1", v1_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// ```bash
/// curl http://localhost:2222/health
/// # {"status":"healthy","games":3,"timestamp":"2026-10-14T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "games": state.registry.len().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
