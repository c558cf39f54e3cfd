//! Session layer sitting between connections and the engine.
//!
//! This module implements:
//! - GameActor: async task owning one game; messages are handled one at a
//!   time, so every operation on a game is serialized
//! - GameHandle: cloneable client for a game actor
//! - SessionRegistry: join code to game map with create-on-first-join and
//!   expiry after a fixed lifetime
//! - JoinCode: short unambiguous codes players share to meet in a game
//!
//! ## Example
//!
//! ```no_run
//! use timebomb::SessionRegistry;
//!
//! # async fn example() -> Result<(), timebomb::SessionError> {
//! let registry = SessionRegistry::default();
//! let seat = registry.join(None, "alice").await?;
//! let (_id, mut events) = seat.handle.subscribe(32).await?;
//!
//! registry.join(Some(seat.code.as_str()), "bob").await?;
//! let _event = events.recv().await;
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod code;
pub mod config;
pub mod errors;
pub mod messages;
pub mod registry;

pub use actor::{GameActor, GameHandle};
pub use code::JoinCode;
pub use config::SessionConfig;
pub use errors::SessionError;
pub use messages::{GameMessage, GameSummary};
pub use registry::{Seat, SessionRegistry};
