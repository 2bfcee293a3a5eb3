//! Two-snake terminal game: one human, one greedy AI, on a wrap-around grid.
//!
//! The simulation ([`Game`]) is UI-agnostic and driven by an injected
//! [`ChaCha8Rng`](rand_chacha::ChaCha8Rng), so every tick is reproducible.

pub mod ai;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod snake;

pub use config::{Cli, Settings};
pub use error::SnakeError;
pub use food::Food;
pub use game::{Game, GameStatus, Outcome, TickReport};
pub use grid::Grid;
pub use snake::{Control, Snake, resolve_heading};

/// Integer coordinate type for grid cells
pub type Coord = i32;

/// A logical board cell. Row 0 / col 0 and the last row / col are walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub row: Coord,
    pub col: Coord,
}

impl Point {
    #[inline]
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Manhattan distance, ignoring wrap-around.
    #[inline]
    pub fn manhattan(self, other: Self) -> Coord {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
}

impl Direction {
    /// Candidate order used by the AI; earlier entries win ties.
    pub const ALL: [Direction; 4] = [Self::Left, Self::Right, Self::Down, Self::Up];

    /// (row, col) offset of one step.
    #[inline]
    pub fn delta(self) -> (Coord, Coord) {
        match self {
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Up => (-1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    #[inline]
    pub fn is_opposite(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Up, Self::Down)
                | (Self::Down, Self::Up)
                | (Self::Right, Self::Left)
                | (Self::Left, Self::Right)
        )
    }
}
