//! # Time Bomb
//!
//! A social-deduction card game engine. Players take turns revealing hidden
//! cards from each other's hands: defenders win by revealing every wire
//! before the clock runs out, bombers win by revealing the bomb or by
//! outlasting the final round.
//!
//! ## Core Modules
//!
//! - [`game`]: Deck and role generation, the game state machine, event
//!   notification and per-player views
//! - [`session`]: Per-game actors, join codes and the registry that creates
//!   and expires games
//!
//! ## Example
//!
//! ```
//! use timebomb::{Game, State, Username};
//!
//! let mut game = Game::new();
//! for name in ["alice", "bob", "carol"] {
//!     game.join(&Username::new(name)).unwrap();
//! }
//! game.start().unwrap();
//! assert_eq!(game.state(), State::Playing);
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    Card, CardView, Cut, Game, GameError, GameEvent, GameRng, GameView, Player, PlayerId,
    PlayerView, Role, State, Username, constants,
};

/// Session registry and per-game actors.
pub mod session;
pub use session::{GameHandle, JoinCode, SessionConfig, SessionError, SessionRegistry};
