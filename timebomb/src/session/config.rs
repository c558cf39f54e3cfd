//! Session lifetime and channel sizing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Games are discarded this long after creation, finished or not.
pub const DEFAULT_GAME_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub const DEFAULT_INBOX_CAPACITY: usize = 100;

pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Time from creation until a game is dropped from the registry
    pub game_ttl: Duration,

    /// Pending messages a game actor buffers before senders wait
    pub inbox_capacity: usize,

    /// Events buffered per display before new ones are dropped
    pub subscriber_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_ttl: DEFAULT_GAME_TTL,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
            subscriber_capacity: DEFAULT_SUBSCRIBER_CAPACITY,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_game_ttl(mut self, game_ttl: Duration) -> Self {
        self.game_ttl = game_ttl;
        self
    }
}
