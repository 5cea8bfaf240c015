//! Insert/update DTOs for the games adapter.

use uuid::Uuid;

/// Fields for creating a new game row. Turn pointer, winner flag, and lock
/// version all start at their creation defaults.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub id: Uuid,
}

impl GameCreate {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// Fields for updating a game's turn state with optimistic locking.
///
/// `current_lock_version` validates that the stored lock_version matches
/// before updating; the update itself increments it.
#[derive(Debug, Clone)]
pub struct GameUpdateTurn {
    pub id: Uuid,
    pub current_lock_version: i32,
    pub next_player: Option<i16>,
    pub winner_declared: Option<bool>,
}

impl GameUpdateTurn {
    pub fn new(id: Uuid, current_lock_version: i32) -> Self {
        Self {
            id,
            current_lock_version,
            next_player: None,
            winner_declared: None,
        }
    }

    pub fn with_next_player(mut self, next_player: i16) -> Self {
        self.next_player = Some(next_player);
        self
    }

    pub fn with_winner_declared(mut self, winner_declared: bool) -> Self {
        self.winner_declared = Some(winner_declared);
        self
    }
}
