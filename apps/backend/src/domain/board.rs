//! The fixed 100-square board and its chute/ladder table.

use std::sync::OnceLock;

/// Number of squares on the board.
pub const BOARD_SQUARES: usize = 100;

/// Maximum number of players a single game supports.
pub const MAX_PLAYERS: usize = 10;

/// A single square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSquare {
    pub is_chute: bool,
    pub is_ladder: bool,
    /// Magnitude of the chute/ladder displacement; zero for plain squares.
    pub squares_to_skip: i16,
}

impl BoardSquare {
    pub const fn plain() -> Self {
        Self {
            is_chute: false,
            is_ladder: false,
            squares_to_skip: 0,
        }
    }

    pub const fn ladder(squares_to_skip: i16) -> Self {
        Self {
            is_chute: false,
            is_ladder: true,
            squares_to_skip,
        }
    }

    pub const fn chute(squares_to_skip: i16) -> Self {
        Self {
            is_chute: true,
            is_ladder: false,
            squares_to_skip,
        }
    }

    /// Signed displacement applied to a player landing here.
    ///
    /// Ladder wins if a square is somehow flagged as both.
    pub fn effect(&self) -> i16 {
        if self.is_ladder {
            self.squares_to_skip
        } else if self.is_chute {
            -self.squares_to_skip
        } else {
            0
        }
    }
}

/// The special squares on the standard board (square number → square).
fn special_square(square_no: usize) -> Option<BoardSquare> {
    let square = match square_no {
        1 => BoardSquare::ladder(37),
        4 => BoardSquare::ladder(10),
        9 => BoardSquare::ladder(22),
        16 => BoardSquare::chute(10),
        21 => BoardSquare::ladder(21),
        28 => BoardSquare::ladder(56),
        36 => BoardSquare::ladder(8),
        47 => BoardSquare::chute(21),
        49 => BoardSquare::chute(38),
        51 => BoardSquare::ladder(16),
        56 => BoardSquare::chute(3),
        62 => BoardSquare::chute(43),
        64 => BoardSquare::chute(4),
        71 => BoardSquare::ladder(20),
        80 => BoardSquare::ladder(20),
        87 => BoardSquare::chute(63),
        93 => BoardSquare::chute(20),
        95 => BoardSquare::chute(20),
        98 => BoardSquare::chute(20),
        _ => return None,
    };
    Some(square)
}

/// The game board: an ordered sequence of squares, 1-indexed in game terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: Vec<BoardSquare>,
}

impl Board {
    /// Build the standard 100-square board from the fixed special-square table.
    pub fn standard() -> Self {
        let squares = (1..=BOARD_SQUARES)
            .map(|n| special_square(n).unwrap_or_else(BoardSquare::plain))
            .collect();
        Self { squares }
    }

    pub fn size(&self) -> usize {
        self.squares.len()
    }

    /// Look up a square by its 1-based square number.
    pub fn square(&self, square_no: usize) -> &BoardSquare {
        debug_assert!((1..=self.squares.len()).contains(&square_no));
        &self.squares[square_no - 1]
    }
}

/// Process-wide board instance: built once, read-only afterwards, safe for
/// concurrent access.
pub fn board() -> &'static Board {
    static BOARD: OnceLock<Board> = OnceLock::new();
    BOARD.get_or_init(Board::standard)
}
