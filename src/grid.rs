use rand::Rng;

use crate::{Coord, Direction, Point, SnakeError};

pub const MIN_SIDE: Coord = 5;
pub const MAX_SIDE: Coord = 1000;

/// Board extents. The outermost ring is wall; entities only live inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: Coord,
    height: Coord,
}

impl Grid {
    pub fn new(width: Coord, height: Coord) -> Result<Self, SnakeError> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(SnakeError::GridTooSmall { width, height });
        }
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(SnakeError::GridTooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    /// Number of playable cells.
    pub fn interior_cells(&self) -> usize {
        ((self.width - 2) * (self.height - 2)) as usize
    }

    pub fn contains(&self, p: Point) -> bool {
        (1..=self.height - 2).contains(&p.row) && (1..=self.width - 2).contains(&p.col)
    }

    /// Folds a point one step past an interior edge back onto the opposite edge.
    pub fn wrap(&self, p: Point) -> Point {
        let mut row = p.row;
        let mut col = p.col;
        if row < 1 {
            row = self.height - 2;
        } else if row >= self.height - 1 {
            row = 1;
        }
        if col < 1 {
            col = self.width - 2;
        } else if col >= self.width - 1 {
            col = 1;
        }
        Point::new(row, col)
    }

    /// The cell reached from `p` by one step in `dir`.
    pub fn step(&self, p: Point, dir: Direction) -> Point {
        let (dr, dc) = dir.delta();
        self.wrap(Point::new(p.row + dr, p.col + dc))
    }

    pub fn random_interior<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point::new(
            rng.random_range(1..self.height - 1),
            rng.random_range(1..self.width - 1),
        )
    }

    /// All interior cells, row-major.
    pub fn interior(&self) -> impl Iterator<Item = Point> + '_ {
        (1..self.height - 1)
            .flat_map(move |row| (1..self.width - 1).map(move |col| Point::new(row, col)))
    }
}
