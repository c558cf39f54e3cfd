//! Game lookup API handlers.
//!
//! # Examples
//!
//! Create a game and share its code:
//! ```bash
//! curl -X POST http://localhost:2222/api/v1/games
//! # {"code":"K7QWZP"}
//! ```
//!
//! Check who is waiting in it:
//! ```bash
//! curl http://localhost:2222/api/v1/games/K7QWZP
//! ```

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use timebomb::{JoinCode, session::GameSummary};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedGame {
    pub code: JoinCode,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Create an empty game in the lobby.
///
/// Returns `201 Created` with the join code.
pub async fn create_game(State(state): State<AppState>) -> (StatusCode, Json<CreatedGame>) {
    let handle = state.registry.create().await;
    (
        StatusCode::CREATED,
        Json(CreatedGame {
            code: handle.code().clone(),
        }),
    )
}

/// Public summary of one game: state, round and seated names.
///
/// # Errors
///
/// - `400 Bad Request`: malformed join code
/// - `404 Not Found`: no live game under this code
pub async fn get_game(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<GameSummary>, ApiError> {
    let code = JoinCode::parse(&code).map_err(|e| error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let handle = state
        .registry
        .get(&code)
        .await
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Game not found"))?;

    handle
        .summary()
        .await
        .map(Json)
        .map_err(|_| error(StatusCode::NOT_FOUND, "Game not found"))
}
