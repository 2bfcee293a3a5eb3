use thiserror::Error;

use crate::{Coord, Point};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnakeError {
    #[error("grid must be at least 5x5, got {width}x{height}")]
    GridTooSmall { width: Coord, height: Coord },
    #[error("grid must be at most 1000x1000, got {width}x{height}")]
    GridTooLarge { width: Coord, height: Coord },
    #[error("start cell {point} is not inside the playable area")]
    OutOfBounds { point: Point },
    #[error("a game needs at least one snake")]
    NoSnakes,
}
