//! Scenario tests for turn resolution.

use crate::domain::board::{board, BOARD_SQUARES};
use crate::domain::state::{advance_turn, GameState, Player};
use crate::domain::turns::resolve_move;

fn state_with_positions(positions: &[i16]) -> GameState {
    let players = positions
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let mut player = Player::new(format!("p{i}"));
            player.position = p;
            player
        })
        .collect();
    GameState::new(players)
}

#[test]
fn overshooting_the_board_clamps_to_99_and_wins() {
    // Player at 95 rolls a 5: raw target 100 >= board size, clamp to 99.
    let mut state = state_with_positions(&[95, 0]);
    let resolution = resolve_move(&mut state, board(), 5).unwrap();

    assert_eq!(resolution.to, (BOARD_SQUARES - 1) as i16);
    assert!(resolution.won);
    assert_eq!(state.players[0].position, 99);
    assert!(state.players[0].is_winner);
    assert!(state.winner_declared);
}

#[test]
fn the_final_chute_still_triggers_on_an_exact_landing() {
    // 93 + 5 = 98, a chute of magnitude 20; the player slides back to 78
    // instead of winning.
    let mut state = state_with_positions(&[93, 0]);
    let resolution = resolve_move(&mut state, board(), 5).unwrap();
    assert_eq!(resolution.to, 78);
    assert!(!resolution.won);
    assert!(!state.winner_declared);
}

#[test]
fn first_move_onto_square_1_climbs_the_ladder_to_38() {
    let mut state = state_with_positions(&[0, 0]);
    let resolution = resolve_move(&mut state, board(), 1).unwrap();

    assert_eq!(resolution.from, 0);
    assert_eq!(resolution.to, 38);
    assert!(!resolution.won);
    assert_eq!(state.players[0].position, 38);
    assert!(!state.winner_declared);
}

#[test]
fn landing_on_a_chute_slides_back() {
    // 40 + 7 = 47, a chute of magnitude 21.
    let mut state = state_with_positions(&[40, 0]);
    let resolution = resolve_move(&mut state, board(), 7).unwrap();
    assert_eq!(resolution.to, 26);
    assert!(!state.winner_declared);
}

#[test]
fn a_ladder_reaching_the_winning_square_declares_the_winner() {
    // 74 + 6 = 80, ladder of 20 → 100, clamped to 99 and declared the win.
    let mut state = state_with_positions(&[74, 0]);
    let resolution = resolve_move(&mut state, board(), 6).unwrap();
    assert_eq!(resolution.to, 99);
    assert!(resolution.won);
    assert!(state.players[0].is_winner);
}

#[test]
fn landing_exactly_on_99_wins_without_an_effect() {
    // Square 99 is plain; the post-effect check still treats size - 1 as won.
    let mut state = state_with_positions(&[94, 0]);
    let resolution = resolve_move(&mut state, board(), 5).unwrap();
    assert_eq!(resolution.to, 99);
    assert!(resolution.won);
}

#[test]
fn effects_do_not_chain() {
    // 3 + 1 = 4, ladder of 10 → 14. Square 14 is plain, but even a special
    // destination would not re-trigger; the position is simply 14.
    let mut state = state_with_positions(&[3, 0]);
    let resolution = resolve_move(&mut state, board(), 1).unwrap();
    assert_eq!(resolution.to, 14);
}

#[test]
fn negative_positions_are_not_clamped() {
    // Unreachable through normal play, but the low end is deliberately
    // unguarded: a negative position moves forward without effect lookups.
    let mut state = state_with_positions(&[-5, 0]);
    let resolution = resolve_move(&mut state, board(), 2).unwrap();
    assert_eq!(resolution.to, -3);
    assert!(!resolution.won);
}

#[test]
fn only_the_current_player_moves() {
    let mut state = state_with_positions(&[10, 20]);
    state.next_player = 1;
    resolve_move(&mut state, board(), 3).unwrap();

    assert_eq!(state.players[0].position, 10);
    assert_eq!(state.players[1].position, 23);
}

#[test]
fn a_full_game_produces_exactly_one_winner() {
    let mut state = state_with_positions(&[0, 0, 0]);
    let rolls = [3u8, 1, 4, 1, 5, 6, 2, 6, 5, 3, 5, 4];
    let mut cursor = 0;

    while !state.winner_declared {
        assert!(cursor < 10_000, "game did not terminate");
        let roll = rolls[cursor % rolls.len()];
        cursor += 1;
        resolve_move(&mut state, board(), roll).unwrap();
        advance_turn(&mut state);
    }

    let winners = state.players.iter().filter(|p| p.is_winner).count();
    assert_eq!(winners, 1);
    for player in &state.players {
        assert!(player.position <= 99);
    }
}
