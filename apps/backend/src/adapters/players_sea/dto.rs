//! Insert/update DTOs for the game players adapter.

use uuid::Uuid;

/// Fields for inserting one player row at game creation.
#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub game_id: Uuid,
    pub name: String,
    pub turn_order: i16,
}

/// Fields for persisting a resolved move: the mover's new position and
/// winner flag, addressed by turn order.
#[derive(Debug, Clone)]
pub struct PlayerUpdatePosition {
    pub game_id: Uuid,
    pub turn_order: i16,
    pub position: i16,
    pub is_winner: bool,
}
