//! Structural staleness check between a submitted snapshot and the
//! authoritative state.
//!
//! This is not full equality: its job is to reject turn submissions built on
//! an out-of-date or tampered client copy before any mutation is attempted.
//! `is_winner` flags are deliberately not compared: a client resubmitting
//! right after the server declared a winner would otherwise always look
//! inconsistent.

use crate::domain::snapshot::GameStateSnapshot;
use crate::domain::state::GameState;

/// True when the submitted snapshot structurally matches the authoritative
/// state: same turn pointer, same winner flag, and pairwise-equal players
/// (exact name, same position) in list order.
pub fn state_matches(authoritative: &GameState, submitted: &GameStateSnapshot) -> bool {
    authoritative.next_player == submitted.next_player
        && authoritative.winner_declared == submitted.winner_declared
        && players_match(authoritative, submitted)
}

fn players_match(authoritative: &GameState, submitted: &GameStateSnapshot) -> bool {
    if authoritative.players.len() != submitted.players.len() {
        return false;
    }
    authoritative
        .players
        .iter()
        .zip(&submitted.players)
        .all(|(ours, theirs)| ours.name == theirs.name && ours.position == theirs.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::snapshot;
    use crate::domain::state::Player;

    fn sample_state() -> GameState {
        let mut state = GameState::new(vec![Player::new("Alice"), Player::new("Bob")]);
        state.players[0].position = 20;
        state.players[1].position = 7;
        state.next_player = 1;
        state
    }

    #[test]
    fn matches_its_own_snapshot() {
        let state = sample_state();
        assert!(state_matches(&state, &snapshot(&state)));
    }

    #[test]
    fn sensitive_to_position_differences() {
        let state = sample_state();
        let mut submitted = snapshot(&state);
        submitted.players[0].position = 12;
        assert!(!state_matches(&state, &submitted));
    }

    #[test]
    fn sensitive_to_name_differences() {
        let state = sample_state();
        let mut submitted = snapshot(&state);
        submitted.players[1].name = "bob".to_string();
        assert!(!state_matches(&state, &submitted));
    }

    #[test]
    fn sensitive_to_turn_pointer_differences() {
        let state = sample_state();
        let mut submitted = snapshot(&state);
        submitted.next_player = 0;
        assert!(!state_matches(&state, &submitted));
    }

    #[test]
    fn sensitive_to_winner_flag_differences() {
        let state = sample_state();
        let mut submitted = snapshot(&state);
        submitted.winner_declared = true;
        assert!(!state_matches(&state, &submitted));
    }

    #[test]
    fn insensitive_to_is_winner_differences() {
        let state = sample_state();
        let mut submitted = snapshot(&state);
        submitted.players[0].is_winner = true;
        assert!(state_matches(&state, &submitted));
    }

    #[test]
    fn rejects_a_shorter_or_longer_player_list() {
        let state = sample_state();

        let mut submitted = snapshot(&state);
        submitted.players.pop();
        assert!(!state_matches(&state, &submitted));

        let mut submitted = snapshot(&state);
        submitted.players.push(crate::domain::snapshot::PlayerSnapshot {
            name: "Carol".to_string(),
            position: 0,
            is_winner: false,
        });
        assert!(!state_matches(&state, &submitted));
    }
}
