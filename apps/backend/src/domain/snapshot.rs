//! Client-facing game snapshots.
//!
//! A snapshot is the minimum state a client needs to hold and submit back
//! with its next turn: the game id, the ordered player list, the turn
//! pointer, and the winner flag. The lock version travels separately in the
//! `ETag` header.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::state::{GameState, Player};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub position: i16,
    pub is_winner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub next_player: usize,
    pub winner_declared: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_id: Uuid,
    pub state: GameStateSnapshot,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            position: player.position,
            is_winner: player.is_winner,
        }
    }
}

/// Produce the client-facing view of a game state.
pub fn snapshot(state: &GameState) -> GameStateSnapshot {
    GameStateSnapshot {
        players: state.players.iter().map(PlayerSnapshot::from).collect(),
        next_player: state.next_player,
        winner_declared: state.winner_declared,
    }
}
