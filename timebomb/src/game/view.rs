//! What one player is allowed to see of a game.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    entities::{Card, Cut, PlayerId, Role, State, Username},
    state_machine::Game,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardView {
    Hidden,
    Shown(Card),
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => write!(f, "?"),
            Self::Shown(card) => card.fmt(f),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerView {
    pub name: Username,
    pub cards: Vec<CardView>,
    /// `None` unless the viewer may know it.
    pub role: Option<Role>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameView {
    pub viewer: PlayerId,
    pub role: Option<Role>,
    pub state: State,
    pub round: usize,
    pub nippers: PlayerId,
    pub wires: usize,
    pub wires_needed: usize,
    pub bomb: bool,
    pub defenders: usize,
    pub bombers: usize,
    pub cuts_left: usize,
    pub cuts: Vec<Cut>,
    pub players: Vec<PlayerView>,
}

impl Game {
    /// Projection for `viewer`. Other hands and roles stay hidden while
    /// the game is playing and are revealed once it's over.
    pub fn view_for(&self, viewer: PlayerId) -> Option<GameView> {
        self.player(viewer)?;
        let state = self.state();
        let (defenders, bombers) = self.roles_count();

        let players = self
            .players()
            .iter()
            .enumerate()
            .map(|(id, player)| {
                let own = id == viewer;
                let cards = player
                    .cards
                    .iter()
                    .map(|&card| {
                        if own || state != State::Playing {
                            CardView::Shown(card)
                        } else {
                            CardView::Hidden
                        }
                    })
                    .collect();
                let role = match state {
                    State::Lobby => None,
                    State::Playing if !own => None,
                    _ => Some(player.role),
                };
                PlayerView {
                    name: player.name.clone(),
                    cards,
                    role,
                }
            })
            .collect::<Vec<_>>();

        Some(GameView {
            viewer,
            role: players[viewer].role,
            state,
            round: self.round(),
            nippers: self.nippers(),
            wires: self.wires(),
            wires_needed: self.players().len(),
            bomb: self.bomb(),
            defenders,
            bombers,
            cuts_left: self.cuts_left_in_round(),
            cuts: self.cuts().to_vec(),
            players,
        })
    }
}
