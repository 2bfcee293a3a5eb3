use rand::Rng;
use tracing::debug;

use crate::{Grid, Point, Snake};

pub const FOOD_SCORE: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Point,
    score: u32,
}

impl Food {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            score: FOOD_SCORE,
        }
    }

    /// Drop a new food on a cell no snake segment occupies.
    pub fn spawn<R: Rng + ?Sized>(grid: &Grid, snakes: &[Snake], rng: &mut R) -> Self {
        let mut food = Self::at(grid.random_interior(rng));
        food.respawn(grid, snakes, rng);
        food
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Re-roll until the food is off every snake. If the board is completely
    /// full the food stays where it is.
    pub fn respawn<R: Rng + ?Sized>(&mut self, grid: &Grid, snakes: &[Snake], rng: &mut R) {
        let occupied = |p: Point| snakes.iter().any(|s| s.occupies(p));
        if !occupied(self.position) {
            return;
        }

        // Small boards can fill up; don't spin forever.
        let max_attempts = grid.interior_cells().saturating_mul(2).max(8);
        for _ in 0..max_attempts {
            let p = grid.random_interior(rng);
            if !occupied(p) {
                debug!(food = %p, "food placed");
                self.position = p;
                return;
            }
        }

        match grid.interior().find(|&p| !occupied(p)) {
            Some(p) => {
                debug!(food = %p, "food placed by scan");
                self.position = p;
            }
            None => debug!("board full, food left in place"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Control, Direction};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn free_food_is_left_alone() {
        let g = Grid::new(10, 10).unwrap();
        let snakes = vec![Snake::human(Point::new(5, 5), Direction::Right)];
        let mut food = Food::at(Point::new(2, 2));
        food.respawn(&g, &snakes, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(food.position(), Point::new(2, 2));
        assert_eq!(food.score(), FOOD_SCORE);
    }

    #[test]
    fn spawn_avoids_snakes() {
        let g = Grid::new(6, 6).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let snakes = vec![
            Snake::new(Point::new(1, 1), Direction::Right, 1, Control::Human),
            Snake::new(Point::new(2, 2), Direction::Right, 1, Control::ai(5)),
        ];
        for _ in 0..100 {
            let food = Food::spawn(&g, &snakes, &mut rng);
            assert!(g.contains(food.position()));
            assert!(snakes.iter().all(|s| !s.occupies(food.position())));
        }
    }

    #[test]
    fn finds_the_last_free_cell() {
        // 5x5 grid has a 3x3 interior; cover all but (3, 3).
        let g = Grid::new(5, 5).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let snakes: Vec<Snake> = g
            .interior()
            .filter(|&p| p != Point::new(3, 3))
            .map(|p| Snake::new(p, Direction::Right, 1, Control::Human))
            .collect();
        let mut food = Food::at(Point::new(1, 1));
        food.respawn(&g, &snakes, &mut rng);
        assert_eq!(food.position(), Point::new(3, 3));
    }

    #[test]
    fn full_board_keeps_food_in_place() {
        let g = Grid::new(5, 5).unwrap();
        let snakes: Vec<Snake> = g
            .interior()
            .map(|p| Snake::new(p, Direction::Right, 1, Control::Human))
            .collect();
        let mut food = Food::at(Point::new(2, 2));
        food.respawn(&g, &snakes, &mut ChaCha8Rng::seed_from_u64(4));
        assert_eq!(food.position(), Point::new(2, 2));
    }
}
