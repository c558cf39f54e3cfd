//! Join codes shared out-of-band so friends land in the same game.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{Result, SessionError};
use crate::game::GameRng;

/// No `I`, `O`, `0` or `1`.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const CODE_LENGTH: usize = 6;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JoinCode(String);

impl JoinCode {
    pub fn generate(rng: &mut GameRng) -> Self {
        let code = (0..CODE_LENGTH)
            .map(|_| char::from(CODE_ALPHABET[rng.random_int(CODE_ALPHABET.len())]))
            .collect();
        Self(code)
    }

    /// Fresh code from OS randomness.
    pub fn random() -> Self {
        Self::generate(&mut GameRng::os())
    }

    /// Accepts user input case-insensitively.
    pub fn parse(raw: &str) -> Result<Self> {
        let code = raw.trim().to_ascii_uppercase();
        let valid = code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_ALPHABET.contains(&b));
        if !valid {
            return Err(SessionError::InvalidCode(raw.to_string()));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JoinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
