//! Players, game state, and turn-pointer math.

use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// A player in a game.
///
/// Position 0 means the player has not yet entered the board; positions
/// 1..=100 are square numbers. Players are owned by their `GameState` and
/// mutated only by turn resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub position: i16,
    pub is_winner: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: 0,
            is_winner: false,
        }
    }
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Ordered players; creation order is turn order, fixed for the game's lifetime.
    pub players: Vec<Player>,
    /// Index into `players` of whoever moves next.
    pub next_player: usize,
    /// True once a winner has been declared; the game is then terminal.
    pub winner_declared: bool,
}

impl GameState {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            next_player: 0,
            winner_declared: false,
        }
    }
}

/// The player whose turn it is.
///
/// Errors if `next_player` does not index a player, which only happens on a
/// corrupted record.
pub fn require_current<'a>(
    state: &'a GameState,
    ctx: &'static str,
) -> Result<&'a Player, DomainError> {
    state.players.get(state.next_player).ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Invariant violated: next_player must index a player ({ctx})"),
        )
    })
}

/// Check that `player_name` is the player expected to move.
pub fn validate_turn(state: &GameState, player_name: &str) -> Result<(), DomainError> {
    let expected = require_current(state, "validate_turn")?;
    if expected.name != player_name {
        return Err(DomainError::validation(
            ValidationKind::NotYourTurn,
            format!("It is {}'s turn.", expected.name),
        ));
    }
    Ok(())
}

/// Advance the turn pointer to the next player in creation order.
///
/// Called unconditionally after every successful move, including the winning
/// one; no turns are accepted once the winner is declared, so the extra
/// advance is unobservable.
pub fn advance_turn(state: &mut GameState) {
    let count = state.players.len();
    debug_assert!(count > 0, "a game always has at least one player");
    state.next_player = (state.next_player + 1) % count;
}
