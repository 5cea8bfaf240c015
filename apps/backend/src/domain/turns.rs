//! Turn resolution: apply a die roll plus board effects to the current player.

use crate::domain::board::Board;
use crate::domain::state::GameState;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Summary of a resolved move, for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResolution {
    pub roll: u8,
    pub from: i16,
    pub to: i16,
    pub won: bool,
}

/// Resolve a move for the player the turn pointer selects, mutating the state
/// in place.
///
/// Rules, in order:
/// - Overshooting the board lands on the last square and wins; no effect lookup.
/// - Otherwise a single chute/ladder effect applies to the landing square.
///   Effects do not chain: landing on another special square via an effect
///   does not re-trigger.
/// - An effect that carries the player to square `size - 1` or beyond is
///   clamped there and wins.
/// - Chutes are applied unclamped at the low end; the position may in
///   principle go negative.
///
/// The win clamp lands on `size - 1` (square 99), one short of the nominal
/// last square; changing it would change observable game outcomes.
pub fn resolve_move(
    state: &mut GameState,
    board: &Board,
    roll: u8,
) -> Result<MoveResolution, DomainError> {
    let board_size = board.size() as i16;
    let idx = state.next_player;
    let current = state.players.get_mut(idx).ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            "Invariant violated: next_player must index a player (resolve_move)",
        )
    })?;

    let from = current.position;
    let mut target = from + i16::from(roll);

    if target >= board_size {
        target = board_size - 1;
        current.is_winner = true;
        state.winner_declared = true;
    } else if target > 0 {
        target += board.square(target as usize).effect();

        if target >= board_size - 1 {
            target = board_size - 1;
            current.is_winner = true;
            state.winner_declared = true;
        }
    }

    let current = &mut state.players[idx];
    current.position = target;

    Ok(MoveResolution {
        roll,
        from,
        to: target,
        won: current.is_winner,
    })
}
