//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::{net::SocketAddr, time::Duration};
use timebomb::SessionConfig;

pub const DEFAULT_BIND: &str = "127.0.0.1:2222";

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Game lifetime and channel sizing
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `ttl_override` - Optional game lifetime override in seconds (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        ttl_override: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_env("SERVER_BIND")?.unwrap_or(default_bind()),
        };

        let defaults = SessionConfig::default();
        let ttl_secs = match ttl_override {
            Some(secs) => secs,
            None => parse_env("GAME_TTL_SECS")?.unwrap_or(defaults.game_ttl.as_secs()),
        };

        let session = SessionConfig {
            game_ttl: Duration::from_secs(ttl_secs),
            inbox_capacity: parse_env("GAME_INBOX_CAPACITY")?.unwrap_or(defaults.inbox_capacity),
            subscriber_capacity: parse_env("SUBSCRIBER_CAPACITY")?
                .unwrap_or(defaults.subscriber_capacity),
        };

        Ok(ServerConfig { bind, session })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.game_ttl.is_zero() {
            return Err(ConfigError::Invalid {
                var: "GAME_TTL_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.session.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "GAME_INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.session.subscriber_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "SUBSCRIBER_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 2222))
}

/// Parses `key` if it's set. Unset is `Ok(None)`; set but unparsable is an error.
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
