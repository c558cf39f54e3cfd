//! Time bomb game engine.
//!
//! This module provides the engine proper:
//! - Secure randomness for shuffling and picking the first nippers
//! - Role pools, deck construction and even dealing
//! - The lobby/playing/finished state machine with its two actions
//! - Event fan-out to subscribed displays
//! - Per-player views that keep hidden cards hidden

pub mod constants;
pub mod deck;
pub mod entities;
pub mod notify;
pub mod rng;
pub mod state_machine;
pub mod view;

pub use entities::{Card, Cut, Player, PlayerId, Role, State, Username};
pub use notify::{GameEvent, SubscriberId, Subscribers};
pub use rng::GameRng;
pub use state_machine::{Game, GameError};
pub use view::{CardView, GameView, PlayerView};
