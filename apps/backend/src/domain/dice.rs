//! Die roll abstraction.
//!
//! Production code rolls against the thread-local OS-seeded generator so no
//! client can influence outcomes. Tests and replays inject a deterministic
//! implementation instead.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// Faces on the die used for turn resolution.
pub const DIE_FACES: u8 = 6;

/// Capability trait for producing die rolls.
///
/// Implementations must be safe to share across concurrently resolving turns.
pub trait DiceRoller: Send + Sync {
    /// Roll a die, returning a value uniformly distributed in `[1, faces]`.
    fn roll(&self, faces: u8) -> u8;
}

/// Production roller backed by `rand`'s thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngDice;

impl DiceRoller for ThreadRngDice {
    fn roll(&self, faces: u8) -> u8 {
        rand::rng().random_range(1..=faces)
    }
}

/// Deterministic roller that cycles through a fixed sequence of rolls.
#[derive(Debug)]
pub struct SequenceDice {
    rolls: Vec<u8>,
    cursor: AtomicUsize,
}

impl SequenceDice {
    /// Panics if `rolls` is empty.
    pub fn new(rolls: Vec<u8>) -> Self {
        assert!(!rolls.is_empty(), "SequenceDice needs at least one roll");
        Self {
            rolls,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl DiceRoller for SequenceDice {
    fn roll(&self, _faces: u8) -> u8 {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.rolls[i % self.rolls.len()]
    }
}
