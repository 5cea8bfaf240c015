//! SeaORM adapter for the game_players table - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::game_players;

pub mod dto;

pub use dto::{PlayerCreate, PlayerUpdatePosition};

/// All player rows for a game, in turn order.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Vec<game_players::Model>, sea_orm::DbErr> {
    game_players::Entity::find()
        .filter(game_players::Column::GameId.eq(game_id))
        .order_by_asc(game_players::Column::TurnOrder)
        .all(conn)
        .await
}

/// Insert the full player roster for a new game.
pub async fn create_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dtos: Vec<PlayerCreate>,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let rows = dtos.into_iter().map(|dto| game_players::ActiveModel {
        id: sea_orm::NotSet,
        game_id: Set(dto.game_id),
        name: Set(dto.name),
        position: Set(0),
        is_winner: Set(false),
        turn_order: Set(dto.turn_order),
        created_at: Set(now),
        updated_at: Set(now),
    });

    game_players::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

/// Persist a mover's new position and winner flag.
pub async fn update_position<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerUpdatePosition,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = game_players::Entity::update_many()
        .col_expr(game_players::Column::Position, Expr::val(dto.position).into())
        .col_expr(
            game_players::Column::IsWinner,
            Expr::val(dto.is_winner).into(),
        )
        .col_expr(game_players::Column::UpdatedAt, Expr::val(now).into())
        .filter(game_players::Column::GameId.eq(dto.game_id))
        .filter(game_players::Column::TurnOrder.eq(dto.turn_order))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(
            "Player not found".to_string(),
        ));
    }
    Ok(())
}
