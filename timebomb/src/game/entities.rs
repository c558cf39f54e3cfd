use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::constants;

/// Position of a player in join order. Stable for the lifetime of a game.
pub type PlayerId = usize;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Card {
    /// Harmless filler.
    #[default]
    Nop,
    /// Moves the defenders one step toward defusing.
    Wire,
    /// Ends the game for the bombers.
    Bomb,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Nop => "-",
            Self::Wire => "+",
            Self::Bomb => "*",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Defender,
    Bomber,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Defender => "defender",
            Self::Bomber => "bomber",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    #[default]
    Lobby,
    Playing,
    DefendersWin,
    BombersWin,
}

impl State {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::DefendersWin | Self::BombersWin)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Lobby => "lobby",
            Self::Playing => "playing",
            Self::DefendersWin => "defenders win",
            Self::BombersWin => "bombers win",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Username(String);

impl Username {
    pub fn new(s: &str) -> Self {
        let username: String = s
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .take(constants::MAX_NAME_LENGTH)
            .collect();
        Self(username)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Player {
    pub name: Username,
    /// Hidden from everyone but the holder while a game is playing.
    pub cards: Vec<Card>,
    pub role: Role,
}

impl Player {
    pub fn new(name: Username) -> Self {
        Self {
            name,
            cards: Vec::new(),
            role: Role::default(),
        }
    }
}

/// One reveal. Never modified once logged.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Cut {
    pub source: PlayerId,
    pub target: PlayerId,
    pub card: Card,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_display() {
        assert_eq!(Card::Nop.to_string(), "-");
        assert_eq!(Card::Wire.to_string(), "+");
        assert_eq!(Card::Bomb.to_string(), "*");
    }

    #[test]
    fn test_state_display_and_terminal() {
        assert_eq!(State::DefendersWin.to_string(), "defenders win");
        assert!(State::BombersWin.is_terminal());
        assert!(State::DefendersWin.is_terminal());
        assert!(!State::Playing.is_terminal());
        assert!(!State::Lobby.is_terminal());
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let json = serde_json::to_string(&State::BombersWin).unwrap();
        assert_eq!(json, "\"bombers_win\"");
    }

    #[test]
    fn test_username_replaces_whitespace() {
        assert_eq!(Username::new(" big al ").as_str(), "big_al");
    }

    #[test]
    fn test_username_truncates() {
        let long = "x".repeat(100);
        assert_eq!(
            Username::new(&long).as_str().len(),
            constants::MAX_NAME_LENGTH
        );
    }

    #[test]
    fn test_username_deserialize_sanitizes() {
        let name: Username = serde_json::from_str("\"a b\"").unwrap();
        assert_eq!(name, Username::new("a_b"));
    }

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new(Username::new("alice"));
        assert!(player.cards.is_empty());
        assert_eq!(player.role, Role::Defender);
    }
}
