//! Game actor owning one game and serializing every operation on it.

use tokio::sync::{mpsc, oneshot};

use super::{
    code::JoinCode,
    errors::{Result, SessionError},
    messages::{GameMessage, GameSummary},
};
use crate::game::{Card, Game, GameEvent, GameView, PlayerId, SubscriberId, Username};

/// Game actor handle for sending messages
#[derive(Clone, Debug)]
pub struct GameHandle {
    sender: mpsc::Sender<GameMessage>,
    code: JoinCode,
}

impl GameHandle {
    pub fn new(sender: mpsc::Sender<GameMessage>, code: JoinCode) -> Self {
        Self { sender, code }
    }

    pub fn code(&self) -> &JoinCode {
        &self.code
    }

    /// Whether both handles talk to the same actor.
    pub fn same_game(&self, other: &Self) -> bool {
        self.sender.same_channel(&other.sender)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    pub async fn send(&self, message: GameMessage) -> Result<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed)
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> GameMessage) -> Result<T> {
        let (response, rx) = oneshot::channel();
        self.send(build(response)).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    pub async fn join(&self, name: Username) -> Result<PlayerId> {
        Ok(self
            .request(|response| GameMessage::Join { name, response })
            .await??)
    }

    pub async fn start(&self) -> Result<()> {
        Ok(self
            .request(|response| GameMessage::Start { response })
            .await??)
    }

    pub async fn cut(&self, source: PlayerId, target: PlayerId, index: usize) -> Result<Card> {
        Ok(self
            .request(|response| GameMessage::Cut {
                source,
                target,
                index,
                response,
            })
            .await??)
    }

    pub async fn view(&self, player: PlayerId) -> Result<Option<GameView>> {
        self.request(|response| GameMessage::GetView { player, response })
            .await
    }

    pub async fn summary(&self) -> Result<GameSummary> {
        self.request(|response| GameMessage::GetSummary { response })
            .await
    }

    /// Registers a new bounded event channel with the game.
    pub async fn subscribe(
        &self,
        capacity: usize,
    ) -> Result<(SubscriberId, mpsc::Receiver<GameEvent>)> {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let id = self
            .request(|response| GameMessage::Subscribe { sender, response })
            .await?;
        Ok((id, receiver))
    }

    pub async fn unsubscribe(&self, id: SubscriberId) -> Result<()> {
        self.send(GameMessage::Unsubscribe { id }).await
    }

    pub async fn close(&self) -> Result<()> {
        self.send(GameMessage::Close).await
    }
}

/// Game actor managing a single game
pub struct GameActor {
    code: JoinCode,
    game: Game,
    inbox: mpsc::Receiver<GameMessage>,
}

impl GameActor {
    /// Create a new game actor and the handle for reaching it
    pub fn new(code: JoinCode, game: Game, inbox_capacity: usize) -> (Self, GameHandle) {
        let (sender, inbox) = mpsc::channel(inbox_capacity.max(1));
        let handle = GameHandle::new(sender, code.clone());
        let actor = Self { code, game, inbox };
        (actor, handle)
    }

    /// Process messages until closed or every handle is dropped
    pub async fn run(mut self) {
        log::info!("Game {} starting", self.code);

        while let Some(message) = self.inbox.recv().await {
            if !self.handle_message(message) {
                break;
            }
        }

        log::info!("Game {} closed", self.code);
    }

    /// Returns `false` once the actor should stop.
    fn handle_message(&mut self, message: GameMessage) -> bool {
        match message {
            GameMessage::Join { name, response } => {
                let result = self.game.join(&name);
                match &result {
                    Ok(id) => log::debug!("Game {}: {} seated as player {}", self.code, name, id),
                    Err(e) => log::debug!("Game {}: {} can't join: {}", self.code, name, e),
                }
                let _ = response.send(result);
            }

            GameMessage::Start { response } => {
                let result = self.game.start();
                if result.is_ok() {
                    log::info!(
                        "Game {} started with {} players",
                        self.code,
                        self.game.players().len()
                    );
                }
                let _ = response.send(result);
            }

            GameMessage::Cut {
                source,
                target,
                index,
                response,
            } => {
                let result = self.game.cut(source, target, index);
                if result.is_ok() && self.game.state().is_terminal() {
                    log::info!("Game {}: {}", self.code, self.game.state());
                }
                let _ = response.send(result);
            }

            GameMessage::GetView { player, response } => {
                let _ = response.send(self.game.view_for(player));
            }

            GameMessage::GetSummary { response } => {
                let _ = response.send(self.summary());
            }

            GameMessage::Subscribe { sender, response } => {
                let id = self.game.add_subscriber(sender);
                log::debug!("Subscriber {} attached to game {}", id, self.code);
                let _ = response.send(id);
            }

            GameMessage::Unsubscribe { id } => {
                self.game.unsubscribe(id);
                log::debug!("Subscriber {} detached from game {}", id, self.code);
            }

            GameMessage::Close => return false,
        }

        true
    }

    fn summary(&self) -> GameSummary {
        GameSummary {
            code: self.code.clone(),
            state: self.game.state(),
            round: self.game.round(),
            players: self
                .game
                .players()
                .iter()
                .map(|player| player.name.clone())
                .collect(),
            subscribers: self.game.subscriber_count(),
        }
    }
}
