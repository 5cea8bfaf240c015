//! Game repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::games_sea::{self, GameUpdateTurn};
use crate::adapters::players_sea::{self, PlayerCreate, PlayerUpdatePosition};
use crate::domain::state::{GameState, Player};
use crate::entities::{game_players, games};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Game domain model
///
/// This represents a game in the domain layer: the games row plus its ordered
/// player rows, assembled into the `GameState` the turn-resolution core works
/// on. `lock_version` is the version read at load time; `save_turn` uses it
/// as the expected version for the optimistic check.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: Uuid,
    pub state: GameState,
    pub lock_version: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<game_players::Model> for Player {
    fn from(model: game_players::Model) -> Self {
        Self {
            name: model.name,
            position: model.position,
            is_winner: model.is_winner,
        }
    }
}

fn assemble(model: games::Model, rows: Vec<game_players::Model>) -> Game {
    let players = rows.into_iter().map(Player::from).collect();
    Game {
        id: model.id,
        state: GameState {
            players,
            next_player: model.next_player.max(0) as usize,
            winner_declared: model.winner_declared,
        },
        lock_version: model.lock_version,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// Free functions (generic) mirroring the adapter surface

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Option<Game>, DomainError> {
    let Some(model) = games_sea::find_by_id(conn, game_id).await? else {
        return Ok(None);
    };
    let rows = players_sea::find_all_by_game(conn, game_id).await?;
    Ok(Some(assemble(model, rows)))
}

/// Find game by ID or return error if not found.
///
/// This is a convenience helper that converts absence into a DomainError,
/// eliminating the repetitive `ok_or_else` pattern when a game must exist.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Game, DomainError> {
    let model = games_sea::require_game(conn, game_id).await?;
    let rows = players_sea::find_all_by_game(conn, game_id).await?;
    Ok(assemble(model, rows))
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<bool, DomainError> {
    Ok(games_sea::find_by_id(conn, game_id).await?.is_some())
}

/// Create a game row plus its player roster and return the assembled game.
pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
    names: &[String],
) -> Result<Game, DomainError> {
    games_sea::create_game(conn, games_sea::GameCreate::new(game_id)).await?;

    let dtos = names
        .iter()
        .enumerate()
        .map(|(i, name)| PlayerCreate {
            game_id,
            name: name.clone(),
            turn_order: i as i16,
        })
        .collect();
    players_sea::create_players(conn, dtos).await?;

    require_game(conn, game_id).await
}

/// Persist a resolved turn: the mover's row plus the turn pointer and winner
/// flag on the games row, gated on the lock version read at load time.
///
/// Returns the updated game with the bumped lock version. A version mismatch
/// surfaces as an optimistic-lock conflict and nothing is committed; the
/// caller's transaction rolls back as a whole.
pub async fn save_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
    mover: usize,
) -> Result<Game, DomainError> {
    let mover_state = game.state.players.get(mover).ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            "Invariant violated: mover must index a player (save_turn)",
        )
    })?;

    players_sea::update_position(
        conn,
        PlayerUpdatePosition {
            game_id: game.id,
            turn_order: mover as i16,
            position: mover_state.position,
            is_winner: mover_state.is_winner,
        },
    )
    .await?;

    let update = GameUpdateTurn::new(game.id, game.lock_version)
        .with_next_player(game.state.next_player as i16)
        .with_winner_declared(game.state.winner_declared);
    games_sea::update_turn(conn, update).await?;

    require_game(conn, game.id).await
}
