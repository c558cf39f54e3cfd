//! Fan-out of game events to connected displays.

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};
use tokio::sync::mpsc;

use super::entities::{Cut, PlayerId};

/// Emitted after every successful mutating operation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Joined { player: PlayerId },
    Started,
    Cut(Cut),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joined { player } => write!(f, "player {player} joined"),
            Self::Started => write!(f, "game started"),
            Self::Cut(cut) => write!(
                f,
                "player {} cut player {}: {}",
                cut.source, cut.target, cut.card
            ),
        }
    }
}

pub type SubscriberId = u64;

/// Registered event channels for one game.
#[derive(Debug, Default)]
pub struct Subscribers {
    senders: HashMap<SubscriberId, mpsc::Sender<GameEvent>>,
    next_id: SubscriberId,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a bounded channel and registers its sending half.
    pub fn subscribe(&mut self, capacity: usize) -> (SubscriberId, mpsc::Receiver<GameEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (self.insert(sender), receiver)
    }

    pub fn insert(&mut self, sender: mpsc::Sender<GameEvent>) -> SubscriberId {
        let id = self.next_id;
        self.next_id += 1;
        self.senders.insert(id, sender);
        log::debug!("Subscriber {id} registered");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let removed = self.senders.remove(&id).is_some();
        if removed {
            log::debug!("Subscriber {id} unregistered");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Queues `event` for every subscriber without waiting on any of them.
    /// A full channel loses this event; a closed one is dropped.
    pub fn broadcast(&mut self, event: GameEvent) {
        self.senders
            .retain(|id, sender| match sender.try_send(event) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("Subscriber {id} channel full, dropping {event}");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {id} disconnected, removing");
                    false
                }
            });
    }
}
