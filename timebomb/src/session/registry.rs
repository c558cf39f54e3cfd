//! Registry mapping join codes to live games.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use super::{
    actor::{GameActor, GameHandle},
    code::JoinCode,
    config::SessionConfig,
    errors::Result,
};
use crate::game::{Game, PlayerId, Username};

/// Where a connection landed after joining.
#[derive(Debug, Clone)]
pub struct Seat {
    pub code: JoinCode,
    pub handle: GameHandle,
    pub player: PlayerId,
}

/// Owns every live game. Cheap to clone; clones share the same games.
#[derive(Clone, Debug)]
pub struct SessionRegistry {
    games: Arc<RwLock<HashMap<JoinCode, GameHandle>>>,
    config: SessionConfig,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl SessionRegistry {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            games: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Seats `name` in the game for `code`, creating the game if nobody has
    /// used the code yet. Without a code a fresh game is created.
    pub async fn join(&self, code: Option<&str>, name: &str) -> Result<Seat> {
        let handle = match code {
            Some(raw) => {
                let code = JoinCode::parse(raw)?;
                self.get_or_create(code).await
            }
            None => self.create().await,
        };
        let player = handle.join(Username::new(name)).await?;
        Ok(Seat {
            code: handle.code().clone(),
            handle,
            player,
        })
    }

    /// New empty game under an unused code.
    pub async fn create(&self) -> GameHandle {
        let mut games = self.games.write().await;
        let code = loop {
            let code = JoinCode::random();
            if !games.contains_key(&code) {
                break code;
            }
        };
        let handle = self.spawn_game(code.clone());
        games.insert(code, handle.clone());
        handle
    }

    pub async fn get_or_create(&self, code: JoinCode) -> GameHandle {
        if let Some(handle) = self.get(&code).await {
            return handle;
        }

        let mut games = self.games.write().await;
        // Another connection may have created it between the two locks.
        if let Some(handle) = games.get(&code) {
            return handle.clone();
        }
        let handle = self.spawn_game(code.clone());
        games.insert(code, handle.clone());
        handle
    }

    pub async fn get(&self, code: &JoinCode) -> Option<GameHandle> {
        self.games.read().await.get(code).cloned()
    }

    /// Drops the game from the registry and stops its actor.
    pub async fn remove(&self, code: &JoinCode) -> bool {
        let removed = self.games.write().await.remove(code);
        match removed {
            Some(handle) => {
                let _ = handle.close().await;
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }

    pub async fn codes(&self) -> Vec<JoinCode> {
        let mut codes: Vec<_> = self.games.read().await.keys().cloned().collect();
        codes.sort();
        codes
    }

    fn spawn_game(&self, code: JoinCode) -> GameHandle {
        let (actor, handle) = GameActor::new(code.clone(), Game::new(), self.config.inbox_capacity);
        tokio::spawn(actor.run());
        self.schedule_expiry(handle.clone());
        log::info!("Created game {code}");
        handle
    }

    fn schedule_expiry(&self, handle: GameHandle) {
        let registry = self.clone();
        let ttl = self.config.game_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            registry.expire(&handle).await;
        });
    }

    /// Removes `handle`'s game unless its code now belongs to a newer game.
    async fn expire(&self, handle: &GameHandle) {
        let mut games = self.games.write().await;
        let current = games
            .get(handle.code())
            .is_some_and(|existing| existing.same_game(handle));
        if current {
            games.remove(handle.code());
            log::info!("Game {} expired", handle.code());
        }
        drop(games);
        let _ = handle.close().await;
    }
}
