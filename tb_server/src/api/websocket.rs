//! WebSocket handler for playing a game in real time.
//!
//! # Connection Flow
//!
//! 1. Client connects via `GET /ws?name=<name>` to open a new game, or
//!    `GET /ws?name=<name>&code=<code>` to join (or create) a known one
//! 2. Server seats the player before upgrading; a rejected join is a plain
//!    HTTP error
//! 3. Server subscribes the connection to the game's events and pushes a
//!    fresh view after each one
//! 4. Client messages are relayed to the game actor
//!
//! # Client Messages
//!
//! ```json
//! {"type": "start"}
//! {"type": "cut", "target": 2, "index": 0}
//! ```
//!
//! # Server Messages
//!
//! - `joined`: sent once with the join code and the player's seat
//! - `view`: the game as this player sees it
//! - `success` / `error`: replies to client messages

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use timebomb::{
    GameView, JoinCode, PlayerId, SessionError,
    session::{GameHandle, Seat},
};
use tokio::sync::mpsc;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    name: String,
    code: Option<String>,
}

/// Client messages received via WebSocket
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Start (or restart) the game
    Start,
    /// Reveal card `index` of player `target`
    Cut { target: PlayerId, index: usize },
}

/// Messages sent to the client
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Joined { code: JoinCode, player: PlayerId },
    View { view: GameView },
    Success { message: String },
    Error { message: String },
}

/// Seat the player and upgrade the connection.
///
/// # Response
///
/// - `101 Switching Protocols` once seated
/// - `400 Bad Request` for an empty name or malformed code
/// - `409 Conflict` when the game is already being played
/// - `410 Gone` when the game closed mid-join
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(state): State<AppState>,
) -> Response {
    if query.name.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Name required").into_response();
    }

    let seat = match state.registry.join(query.code.as_deref(), &query.name).await {
        Ok(seat) => seat,
        Err(e) => {
            let status = match e {
                SessionError::InvalidCode(_) => StatusCode::BAD_REQUEST,
                SessionError::Game(_) => StatusCode::CONFLICT,
                SessionError::Closed => StatusCode::GONE,
            };
            return (status, e.to_string()).into_response();
        }
    };

    let capacity = state.registry.config().subscriber_capacity;
    ws.on_upgrade(move |socket| handle_socket(socket, seat, capacity))
}

fn to_json(message: &ServerMessage) -> Option<String> {
    match serde_json::to_string(message) {
        Ok(json) => Some(json),
        Err(e) => {
            error!("Failed to serialize server message: {}", e);
            None
        }
    }
}

async fn view_message(handle: &GameHandle, player: PlayerId) -> Option<String> {
    match handle.view(player).await {
        Ok(Some(view)) => to_json(&ServerMessage::View { view }),
        Ok(None) => None,
        Err(e) => {
            warn!("Game {}: no view for player {}: {}", handle.code(), player, e);
            None
        }
    }
}

/// Handle an established WebSocket connection until either side hangs up.
async fn handle_socket(socket: WebSocket, seat: Seat, capacity: usize) {
    let Seat {
        code,
        handle,
        player,
    } = seat;
    let (mut sender, mut receiver) = socket.split();

    info!("WebSocket connected: game={}, player={}", code, player);

    let (subscriber_id, mut events) = match handle.subscribe(capacity).await {
        Ok(subscription) => subscription,
        Err(e) => {
            error!("Failed to subscribe to game {}: {}", code, e);
            return;
        }
    };

    let (response_tx, mut response_rx) = mpsc::channel::<String>(32);

    let greeting = ServerMessage::Joined {
        code: code.clone(),
        player,
    };
    for json in [to_json(&greeting), view_message(&handle, player).await]
        .into_iter()
        .flatten()
    {
        if sender.send(Message::Text(json.into())).await.is_err() {
            let _ = handle.unsubscribe(subscriber_id).await;
            return;
        }
    }

    let send_handle = handle.clone();
    let send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                event = events.recv() => {
                    // The game closed or expired.
                    let Some(event) = event else { break };
                    log::debug!("Game {}: {} -> player {}", send_handle.code(), event, player);
                    let Some(json) = view_message(&send_handle, player).await else {
                        continue;
                    };
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Some(response_json) = response_rx.recv() => {
                    if sender.send(Message::Text(response_json.into())).await.is_err() {
                        break;
                    }
                }
            }
        }
        let _ = sender.close().await;
    });

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let response = match serde_json::from_str::<ClientMessage>(text.as_str()) {
                    Ok(client_msg) => handle_client_message(client_msg, &handle, player).await,
                    Err(e) => {
                        warn!("Failed to parse client message: {}", e);
                        ServerMessage::Error {
                            message: "Invalid message format".to_string(),
                        }
                    }
                };

                if let Some(json) = to_json(&response)
                    && response_tx.send(json).await.is_err()
                {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                info!("WebSocket closed: game={}, player={}", code, player);
                break;
            }
            Err(e) => {
                error!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    send_task.abort();
    let _ = handle.unsubscribe(subscriber_id).await;

    info!("WebSocket disconnected: game={}, player={}", code, player);
}

/// Relay one client intent to the game and describe the outcome.
pub async fn handle_client_message(
    msg: ClientMessage,
    handle: &GameHandle,
    player: PlayerId,
) -> ServerMessage {
    let result = match msg {
        ClientMessage::Start => handle
            .start()
            .await
            .map(|()| "Game started".to_string()),
        ClientMessage::Cut { target, index } => handle
            .cut(player, target, index)
            .await
            .map(|card| format!("Revealed {card}")),
    };

    match result {
        Ok(message) => ServerMessage::Success { message },
        Err(e) => ServerMessage::Error {
            message: e.to_string(),
        },
    }
}
