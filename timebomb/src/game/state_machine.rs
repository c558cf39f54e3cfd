//! Authoritative game state and the two player actions.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use super::{
    constants::{FINAL_ROUND, MAX_PLAYERS, MIN_PLAYERS},
    deck,
    entities::{Card, Cut, Player, PlayerId, State, Username},
    notify::{GameEvent, SubscriberId, Subscribers},
    rng::GameRng,
};

/// Rejections of an invalid operation. The game is left untouched.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("game already started")]
    AlreadyStarted,
    #[error("need 3 to 8 players, have {0}")]
    InvalidPlayerCount(usize),
    #[error("game not started")]
    NotStarted,
    #[error("invalid player id: {0}")]
    InvalidPlayer(PlayerId),
    #[error("can't cut your own card")]
    SelfCut,
    #[error("not your turn")]
    NotYourTurn,
    #[error("player only has {available} cards")]
    HandExhausted { available: usize },
}

/// One game of cards, from lobby through any number of epochs.
#[derive(Debug)]
pub struct Game {
    players: Vec<Player>,
    state: State,
    round: usize,
    nippers: PlayerId,
    cuts: Vec<Cut>,
    wires: usize,
    bomb: bool,
    rng: GameRng,
    subscribers: Subscribers,
}

impl Default for Game {
    fn default() -> Self {
        Self::with_rng(GameRng::os())
    }
}

impl Game {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rng(rng: GameRng) -> Self {
        Self {
            players: Vec::with_capacity(MAX_PLAYERS),
            state: State::Lobby,
            round: 0,
            nippers: 0,
            cuts: Vec::new(),
            wires: 0,
            bomb: false,
            rng,
            subscribers: Subscribers::new(),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_id(&self, name: &Username) -> Option<PlayerId> {
        self.players.iter().position(|player| &player.name == name)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn nippers(&self) -> PlayerId {
        self.nippers
    }

    pub fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    pub fn wires(&self) -> usize {
        self.wires
    }

    pub fn bomb(&self) -> bool {
        self.bomb
    }

    /// Cuts still owed before the next deal. Zero once the game is over.
    pub fn cuts_left_in_round(&self) -> usize {
        let n = self.players.len();
        if n == 0 || self.state != State::Playing {
            return 0;
        }
        n - self.cuts.len() % n
    }

    /// Role pool counts for the current number of players.
    pub fn roles_count(&self) -> (usize, usize) {
        deck::roles_count(self.players.len()).unwrap_or((0, 0))
    }

    pub fn subscribe(&mut self, capacity: usize) -> (SubscriberId, mpsc::Receiver<GameEvent>) {
        self.subscribers.subscribe(capacity)
    }

    pub fn add_subscriber(&mut self, sender: mpsc::Sender<GameEvent>) -> SubscriberId {
        self.subscribers.insert(sender)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Seats a player, or returns the existing seat for a known name.
    pub fn join(&mut self, name: &Username) -> Result<PlayerId, GameError> {
        let id = match self.player_id(name) {
            Some(id) => id,
            None => {
                if self.state == State::Playing {
                    return Err(GameError::AlreadyStarted);
                }
                self.players.push(Player::new(name.clone()));
                self.players.len() - 1
            }
        };
        self.subscribers.broadcast(GameEvent::Joined { player: id });
        Ok(id)
    }

    /// Begins a new epoch: fresh roles, fresh deal, random first nippers.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.state == State::Playing {
            return Err(GameError::AlreadyStarted);
        }
        let n = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
            return Err(GameError::InvalidPlayerCount(n));
        }
        let roles =
            deck::assign_roles(n, &mut self.rng).ok_or(GameError::InvalidPlayerCount(n))?;

        self.reset();
        for (player, role) in self.players.iter_mut().zip(roles) {
            player.role = role;
        }
        self.deal();
        self.nippers = self.rng.random_int(n);
        self.state = State::Playing;

        self.subscribers.broadcast(GameEvent::Started);
        Ok(())
    }

    /// Reveals card `index` of `target`'s hand on behalf of `source`.
    pub fn cut(
        &mut self,
        source: PlayerId,
        target: PlayerId,
        index: usize,
    ) -> Result<Card, GameError> {
        if self.state != State::Playing {
            return Err(GameError::NotStarted);
        }
        let n = self.players.len();
        for id in [source, target] {
            if id >= n {
                return Err(GameError::InvalidPlayer(id));
            }
        }
        if source == target {
            return Err(GameError::SelfCut);
        }
        if source != self.nippers {
            return Err(GameError::NotYourTurn);
        }
        let hand = &mut self.players[target].cards;
        if index >= hand.len() {
            return Err(GameError::HandExhausted {
                available: hand.len(),
            });
        }

        let card = hand.remove(index);
        let cut = Cut {
            source,
            target,
            card,
        };
        self.cuts.push(cut);
        self.nippers = target;

        match card {
            Card::Bomb => self.bomb = true,
            Card::Wire => self.wires += 1,
            Card::Nop => {}
        }

        if self.wires == n {
            self.state = State::DefendersWin;
        } else if self.bomb || self.round == FINAL_ROUND {
            self.state = State::BombersWin;
        }

        let cuts = self.cuts.len();
        if self.state == State::Playing && cuts > 0 && cuts % n == 0 {
            self.deal();
            self.round += 1;
        }

        self.subscribers.broadcast(GameEvent::Cut(cut));
        Ok(card)
    }

    fn reset(&mut self) {
        self.cuts.clear();
        self.round = 0;
        self.wires = 0;
        self.bomb = false;
    }

    fn deal(&mut self) {
        let n = self.players.len();
        let cards = deck::build_deck(n, self.cuts.len(), self.wires, &mut self.rng);
        let hands = deck::deal_even(&cards, n);
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.cards = hand;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(n: usize) -> Game {
        let mut game = Game::with_rng(GameRng::seeded(99));
        for i in 0..n {
            game.join(&Username::new(&format!("p{i}"))).unwrap();
        }
        game
    }

    fn count(game: &Game, kind: Card) -> usize {
        game.players()
            .iter()
            .flat_map(|p| &p.cards)
            .filter(|&&c| c == kind)
            .count()
    }

    #[test]
    fn test_join_assigns_positions() {
        let game = game_with(3);
        assert_eq!(game.players().len(), 3);
        assert_eq!(game.player_id(&Username::new("p2")), Some(2));
        assert_eq!(game.state(), State::Lobby);
    }

    #[test]
    fn test_join_is_idempotent() {
        let mut game = game_with(3);
        assert_eq!(game.join(&Username::new("p1")), Ok(1));
        assert_eq!(game.players().len(), 3);
    }

    #[test]
    fn test_join_rejected_while_playing_but_known_names_allowed() {
        let mut game = game_with(3);
        game.start().unwrap();
        assert_eq!(
            game.join(&Username::new("late")),
            Err(GameError::AlreadyStarted)
        );
        assert_eq!(game.join(&Username::new("p0")), Ok(0));
        assert_eq!(game.players().len(), 3);
    }

    #[test]
    fn test_start_requires_player_count() {
        let mut game = game_with(2);
        assert_eq!(game.start(), Err(GameError::InvalidPlayerCount(2)));
        assert_eq!(game.state(), State::Lobby);

        let mut game = game_with(9);
        assert_eq!(game.start(), Err(GameError::InvalidPlayerCount(9)));
    }

    #[test]
    fn test_start_twice_fails() {
        let mut game = game_with(4);
        game.start().unwrap();
        assert_eq!(game.start(), Err(GameError::AlreadyStarted));
    }

    #[test]
    fn test_start_deals_five_each_with_one_bomb() {
        let mut game = game_with(5);
        game.start().unwrap();

        assert_eq!(game.state(), State::Playing);
        assert!(game.players().iter().all(|p| p.cards.len() == 5));
        assert_eq!(count(&game, Card::Bomb), 1);
        assert_eq!(count(&game, Card::Wire), 5);
        assert!(game.nippers() < 5);
    }

    #[test]
    fn test_cut_before_start() {
        let mut game = game_with(3);
        assert_eq!(game.cut(0, 1, 0), Err(GameError::NotStarted));
    }

    #[test]
    fn test_cut_validation_order() {
        let mut game = game_with(3);
        game.start().unwrap();
        let nippers = game.nippers();
        let other = (nippers + 1) % 3;
        let bystander = (nippers + 2) % 3;

        assert_eq!(game.cut(nippers, 3, 0), Err(GameError::InvalidPlayer(3)));
        assert_eq!(game.cut(7, other, 0), Err(GameError::InvalidPlayer(7)));
        assert_eq!(game.cut(nippers, nippers, 0), Err(GameError::SelfCut));
        assert_eq!(game.cut(bystander, other, 0), Err(GameError::NotYourTurn));
        assert_eq!(
            game.cut(nippers, other, 5),
            Err(GameError::HandExhausted { available: 5 })
        );
        assert!(game.cuts().is_empty());
    }

    #[test]
    fn test_cut_removes_card_and_passes_nippers() {
        let mut game = game_with(4);
        game.start().unwrap();
        let source = game.nippers();
        let target = (source + 1) % 4;
        let before = game.players()[target].cards.clone();

        let card = game.cut(source, target, 2).unwrap();

        let mut expected = before.clone();
        expected.remove(2);
        assert_eq!(card, before[2]);
        assert_eq!(game.players()[target].cards, expected);
        assert_eq!(game.nippers(), target);
        assert_eq!(
            game.cuts(),
            &[Cut {
                source,
                target,
                card
            }]
        );
    }

    #[test]
    fn test_failed_operations_do_not_broadcast() {
        let mut game = game_with(3);
        let (_, mut rx) = game.subscribe(16);
        game.start().unwrap();
        assert_eq!(rx.try_recv().unwrap(), GameEvent::Started);

        let nippers = game.nippers();
        let _ = game.cut(nippers, nippers, 0);
        let _ = game.start();
        let _ = game.join(&Username::new("late"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_idempotent_join_still_broadcasts() {
        let mut game = game_with(3);
        let (_, mut rx) = game.subscribe(4);
        game.join(&Username::new("p1")).unwrap();
        assert_eq!(rx.try_recv().unwrap(), GameEvent::Joined { player: 1 });
    }

    #[test]
    fn test_cuts_left_in_round() {
        let mut game = game_with(3);
        assert_eq!(game.cuts_left_in_round(), 0);
        game.start().unwrap();
        assert_eq!(game.cuts_left_in_round(), 3);
    }

    #[test]
    fn test_roles_count_follows_player_count() {
        let game = game_with(7);
        assert_eq!(game.roles_count(), (5, 3));
        let game = game_with(1);
        assert_eq!(game.roles_count(), (0, 0));
    }
}
