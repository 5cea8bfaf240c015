//! Property tests for turn math.

use proptest::prelude::*;

use crate::domain::board::board;
use crate::domain::state::{advance_turn, GameState, Player};
use crate::domain::turns::resolve_move;

fn single_player_at(position: i16) -> GameState {
    let mut player = Player::new("solo");
    player.position = position;
    GameState::new(vec![player])
}

proptest! {
    /// From any reachable position, a resolved move stays on the board and
    /// the winner flag tracks the winning square exactly.
    #[test]
    fn resolved_positions_stay_bounded(start in 0i16..=98, roll in 1u8..=6) {
        let mut state = single_player_at(start);
        let resolution = resolve_move(&mut state, board(), roll).unwrap();

        prop_assert!(resolution.to <= 99);
        prop_assert!(resolution.to >= 0);
        prop_assert_eq!(resolution.won, resolution.to == 99);
        prop_assert_eq!(state.winner_declared, state.players[0].is_winner);
    }

    /// Resolution never moves anyone but the current player.
    #[test]
    fn bystanders_never_move(start in 0i16..=98, other in 0i16..=98, roll in 1u8..=6) {
        let mut bystander = Player::new("bystander");
        bystander.position = other;
        let mut mover = Player::new("mover");
        mover.position = start;
        let mut state = GameState::new(vec![mover, bystander]);

        resolve_move(&mut state, board(), roll).unwrap();
        prop_assert_eq!(state.players[1].position, other);
    }

    /// Applying the turn pointer n times over n players is the identity.
    #[test]
    fn advance_turn_is_a_modulo_cycle(n in 1usize..=10, start in 0usize..10) {
        prop_assume!(start < n);
        let players = (0..n).map(|i| Player::new(format!("p{i}"))).collect();
        let mut state = GameState::new(players);
        state.next_player = start;

        for _ in 0..n {
            advance_turn(&mut state);
        }
        prop_assert_eq!(state.next_player, start);

        advance_turn(&mut state);
        prop_assert_eq!(state.next_player, (start + 1) % n);
    }
}
