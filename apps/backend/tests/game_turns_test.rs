//! Integration tests for end-to-end turn submission: staleness checks,
//! turn-order validation, optimistic locking, and win handling.

mod common;

use std::sync::Arc;

use backend::config::db::DbProfile;
use backend::db::txn::with_txn;
use backend::domain::dice::SequenceDice;
use backend::domain::snapshot::{self, GameSnapshot};
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend::infra::state::build_state;
use backend::repos::games::{self, Game};
use backend::services::game_flow::GameFlowService;
use uuid::Uuid;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn snap(game: &Game) -> GameSnapshot {
    GameSnapshot {
        game_id: game.id,
        state: snapshot::snapshot(&game.state),
    }
}

#[tokio::test]
async fn test_first_turn_applies_roll_and_ladder() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            // Scripted roll of 1: square 1 is a ladder of 37, so Alice lands on 38.
            let service = GameFlowService::with_dice(Arc::new(SequenceDice::new(vec![1])));
            let game = service.create_game(txn, &names(&["Alice", "Bob"])).await?;

            let updated = service
                .play_turn(txn, game.id, &snap(&game), "Alice", None)
                .await?;

            assert_eq!(updated.state.players[0].position, 38);
            assert!(!updated.state.players[0].is_winner);
            assert_eq!(updated.state.players[1].position, 0);
            assert_eq!(updated.state.next_player, 1);
            assert!(!updated.state.winner_declared);
            assert_eq!(updated.lock_version, 2, "save must bump the lock version");

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_wrong_actor_is_rejected_and_nothing_changes() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = GameFlowService::new();
            let game = service.create_game(txn, &names(&["Alice", "Bob"])).await?;

            let result = service
                .play_turn(txn, game.id, &snap(&game), "Bob", None)
                .await;

            match result.unwrap_err() {
                AppError::Validation { code, detail, .. } => {
                    assert_eq!(code, ErrorCode::NotYourTurn);
                    assert_eq!(detail, "It is Alice's turn.");
                }
                e => panic!("Expected Validation error with NotYourTurn, got {e:?}"),
            }

            // No state was mutated
            let reloaded = games::require_game(txn, game.id).await?;
            assert_eq!(reloaded.state.players[0].position, 0);
            assert_eq!(reloaded.state.players[1].position, 0);
            assert_eq!(reloaded.state.next_player, 0);
            assert_eq!(reloaded.lock_version, 1);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_stale_snapshot_is_rejected_and_nothing_changes() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = GameFlowService::new();
            let game = service.create_game(txn, &names(&["Alice", "Bob"])).await?;

            // Client claims Alice is on 12 while the server has her on 0.
            let mut submitted = snap(&game);
            submitted.state.players[0].position = 12;

            let result = service
                .play_turn(txn, game.id, &submitted, "Alice", None)
                .await;

            let err = result.unwrap_err();
            assert_eq!(err.code(), ErrorCode::InconsistentState);

            let reloaded = games::require_game(txn, game.id).await?;
            assert_eq!(reloaded.state.players[0].position, 0);
            assert_eq!(reloaded.lock_version, 1);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_snapshot_for_another_game_is_rejected() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = GameFlowService::new();
            let game = service.create_game(txn, &names(&["Alice", "Bob"])).await?;

            let mut submitted = snap(&game);
            submitted.game_id = Uuid::new_v4();

            let result = service
                .play_turn(txn, game.id, &submitted, "Alice", None)
                .await;

            assert_eq!(result.unwrap_err().code(), ErrorCode::InconsistentState);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_unknown_game_is_not_found() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = GameFlowService::new();
            let game = service.create_game(txn, &names(&["Alice"])).await?;

            let missing = Uuid::new_v4();
            let result = service
                .play_turn(txn, missing, &snap(&game), "Alice", None)
                .await;

            assert_eq!(result.unwrap_err().code(), ErrorCode::GameNotFound);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_stale_lock_version_conflicts_before_anything_runs() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = GameFlowService::new();
            let game = service.create_game(txn, &names(&["Alice", "Bob"])).await?;

            let result = service
                .play_turn(txn, game.id, &snap(&game), "Alice", Some(game.lock_version + 1))
                .await;

            assert_eq!(result.unwrap_err().code(), ErrorCode::OptimisticLock);

            let reloaded = games::require_game(txn, game.id).await?;
            assert_eq!(reloaded.lock_version, 1);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_lock_version_increments_on_every_turn() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = GameFlowService::with_dice(Arc::new(SequenceDice::new(vec![2])));
            let game = service.create_game(txn, &names(&["Alice", "Bob"])).await?;

            let after_first = service
                .play_turn(txn, game.id, &snap(&game), "Alice", Some(game.lock_version))
                .await?;
            assert_eq!(after_first.lock_version, 2);

            let after_second = service
                .play_turn(
                    txn,
                    game.id,
                    &snap(&after_first),
                    "Bob",
                    Some(after_first.lock_version),
                )
                .await?;
            assert_eq!(after_second.lock_version, 3);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_winning_move_clamps_to_99_and_ends_the_game() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            // Every roll is a 5: Alice walks 5, 10, ..., 75, 80 (ladder to 100,
            // clamped to 99) while Bob trails one square set behind.
            let service = GameFlowService::with_dice(Arc::new(SequenceDice::new(vec![5])));
            let mut game = service.create_game(txn, &names(&["Alice", "Bob"])).await?;

            let mut moves = 0;
            while !game.state.winner_declared {
                assert!(moves < 1000, "game did not terminate");
                let actor = game.state.players[game.state.next_player].name.clone();
                game = service
                    .play_turn(txn, game.id, &snap(&game), &actor, None)
                    .await?;
                moves += 1;
            }

            assert!(game.state.winner_declared);
            let winners: Vec<_> = game
                .state
                .players
                .iter()
                .filter(|p| p.is_winner)
                .collect();
            assert_eq!(winners.len(), 1, "exactly one winner");
            assert_eq!(winners[0].name, "Alice");
            assert_eq!(winners[0].position, 99);

            // The turn pointer still advanced after the winning move.
            assert_eq!(game.state.next_player, 1);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_no_turns_are_accepted_after_the_win() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = GameFlowService::with_dice(Arc::new(SequenceDice::new(vec![5])));
            let mut game = service.create_game(txn, &names(&["Alice", "Bob"])).await?;

            let mut moves = 0;
            while !game.state.winner_declared {
                assert!(moves < 1000, "game did not terminate");
                let actor = game.state.players[game.state.next_player].name.clone();
                game = service
                    .play_turn(txn, game.id, &snap(&game), &actor, None)
                    .await?;
                moves += 1;
            }

            // Bob is next on the pointer, but the game is terminal.
            let actor = game.state.players[game.state.next_player].name.clone();
            let result = service
                .play_turn(txn, game.id, &snap(&game), &actor, None)
                .await;
            assert_eq!(result.unwrap_err().code(), ErrorCode::GameOver);

            // Nothing moved
            let final_version = game.lock_version;
            let reloaded = games::require_game(txn, game.id).await?;
            assert_eq!(reloaded.lock_version, final_version);
            assert_eq!(reloaded.state, game.state);

            Ok::<_, AppError>(())
        })
    })
    .await?;

    Ok(())
}
