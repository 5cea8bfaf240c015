//! Game lifecycle orchestration: creation and end-to-end turn submission.

use std::sync::Arc;

use sea_orm::DatabaseTransaction;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::board::{board, MAX_PLAYERS};
use crate::domain::consistency;
use crate::domain::dice::{DiceRoller, ThreadRngDice, DIE_FACES};
use crate::domain::snapshot::GameSnapshot;
use crate::domain::{state, turns};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::games::{self as games_repo, Game};

/// Game flow service.
///
/// Holds the injected die roller; everything else is loaded fresh from the
/// transaction on every call. Services are trust boundaries and must not
/// rely on caller-provided state for validation.
pub struct GameFlowService {
    dice: Arc<dyn DiceRoller>,
}

impl GameFlowService {
    pub fn new() -> Self {
        Self::with_dice(Arc::new(ThreadRngDice))
    }

    /// Construct with a specific roller (deterministic in tests).
    pub fn with_dice(dice: Arc<dyn DiceRoller>) -> Self {
        Self { dice }
    }

    /// Create a new game with the given players, all at position 0 with the
    /// first player to move.
    pub async fn create_game(
        &self,
        txn: &DatabaseTransaction,
        player_names: &[String],
    ) -> Result<Game, AppError> {
        validate_player_count(player_names.len())?;
        validate_player_names(player_names)?;

        let game_id = Uuid::new_v4();
        debug!(game_id = %game_id, players = player_names.len(), "Creating game");

        let game = games_repo::create_game(txn, game_id, player_names).await?;

        info!(
            game_id = %game.id,
            players = game.state.players.len(),
            "Game created"
        );
        Ok(game)
    }

    /// Submit a turn for a player.
    ///
    /// The submitted snapshot is only used for the staleness check; the move
    /// is resolved against the authoritative state and the client copy is
    /// discarded.
    ///
    /// # Parameters
    /// - `expected_lock_version`: If provided, validates that the game's
    ///   current lock_version matches this value before anything else runs
    ///   (conveyed over HTTP via `If-Match`). The save itself re-checks the
    ///   load-time version either way.
    ///
    /// # Returns
    /// Returns the updated game with the new lock_version after the mutation.
    pub async fn play_turn(
        &self,
        txn: &DatabaseTransaction,
        game_id: Uuid,
        submitted: &GameSnapshot,
        player_name: &str,
        expected_lock_version: Option<i32>,
    ) -> Result<Game, AppError> {
        debug!(game_id = %game_id, player = player_name, "Submitting turn");

        let mut game = games_repo::require_game(txn, game_id).await?;

        // Validate lock version if provided (optimistic locking)
        if let Some(expected) = expected_lock_version {
            if game.lock_version != expected {
                return Err(DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "Resource was modified concurrently (expected version {expected}, actual version {}). Please refresh and retry.",
                        game.lock_version
                    ),
                )
                .into());
            }
        }

        if submitted.game_id != game.id
            || !consistency::state_matches(&game.state, &submitted.state)
        {
            return Err(DomainError::conflict(
                ConflictKind::StaleSnapshot,
                "The provided game state does not match the server's state.",
            )
            .into());
        }

        // Terminal state: once a winner is declared no further turns resolve.
        if game.state.winner_declared {
            return Err(DomainError::validation(
                ValidationKind::GameOver,
                format!("Game {} already has a winner; no further turns are accepted.", game.id),
            )
            .into());
        }

        state::validate_turn(&game.state, player_name)?;

        let mover = game.state.next_player;
        let roll = self.dice.roll(DIE_FACES);
        let resolution = turns::resolve_move(&mut game.state, board(), roll)?;
        state::advance_turn(&mut game.state);

        info!(
            game_id = %game.id,
            player = player_name,
            roll = resolution.roll,
            from = resolution.from,
            to = resolution.to,
            winner = resolution.won,
            "Turn resolved"
        );

        let saved = games_repo::save_turn(txn, &game, mover).await?;
        Ok(saved)
    }
}

impl Default for GameFlowService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_player_count(count: usize) -> Result<(), AppError> {
    if count == 0 || count > MAX_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::PlayerCount,
            format!("Number of players must be between 1 and {MAX_PLAYERS}."),
        )
        .into());
    }
    Ok(())
}

fn validate_player_names(names: &[String]) -> Result<(), AppError> {
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::PlayerName,
                "Player names must not be empty.",
            )
            .into());
        }
        if names[..i].contains(name) {
            return Err(DomainError::validation(
                ValidationKind::PlayerName,
                format!("Duplicate player name: {name}"),
            )
            .into());
        }
    }
    Ok(())
}
