//! Game actor message types.

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use super::code::JoinCode;
use crate::game::{Card, GameError, GameEvent, GameView, PlayerId, State, SubscriberId, Username};

/// Messages that can be sent to a GameActor
#[derive(Debug)]
pub enum GameMessage {
    /// Seat a player by name
    Join {
        name: Username,
        response: oneshot::Sender<Result<PlayerId, GameError>>,
    },

    /// Begin a new epoch
    Start {
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Reveal a card from another player's hand
    Cut {
        source: PlayerId,
        target: PlayerId,
        index: usize,
        response: oneshot::Sender<Result<Card, GameError>>,
    },

    /// Get the game as one player sees it
    GetView {
        player: PlayerId,
        response: oneshot::Sender<Option<GameView>>,
    },

    /// Get public game details
    GetSummary {
        response: oneshot::Sender<GameSummary>,
    },

    /// Subscribe to game events
    Subscribe {
        sender: mpsc::Sender<GameEvent>,
        response: oneshot::Sender<SubscriberId>,
    },

    /// Unsubscribe from game events
    Unsubscribe { id: SubscriberId },

    /// Stop the actor
    Close,
}

/// Details anyone holding the code may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub code: JoinCode,
    pub state: State,
    pub round: usize,
    pub players: Vec<Username>,
    pub subscribers: usize,
}
