//! Greedy steering for computer-controlled snakes.

use tracing::{trace, warn};

use crate::{Direction, Food, Grid, Point, Snake};

/// Heading for `snakes[index]` that brings its head closest to the food.
///
/// Reversing is never considered, nor is any cell that belongs to a snake's
/// collidable body. Ties go to the earlier entry of [`Direction::ALL`]. When
/// every candidate is blocked the snake keeps its current heading.
pub fn choose_direction(grid: &Grid, snakes: &[Snake], index: usize, food: &Food) -> Direction {
    let me = &snakes[index];
    let target = food.position();

    let best = Direction::ALL
        .into_iter()
        .filter(|&dir| !dir.is_opposite(me.direction()))
        .map(|dir| (dir, me.next_position(grid, dir)))
        .filter(|&(_, cell)| !is_blocked(snakes, index, cell))
        .min_by_key(|&(_, cell)| target.manhattan(cell));

    match best {
        Some((dir, cell)) => {
            trace!(snake = index + 1, ?dir, to = %cell, "ai heading");
            dir
        }
        None => {
            warn!(snake = index + 1, "ai boxed in, holding heading");
            me.direction()
        }
    }
}

fn is_blocked(snakes: &[Snake], index: usize, cell: Point) -> bool {
    snakes
        .iter()
        .enumerate()
        .any(|(j, other)| other.collides_at(cell, j == index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Control;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid() -> Grid {
        Grid::new(20, 20).unwrap()
    }

    #[test]
    fn food_behind_picks_closest_legal_turn() {
        let g = grid();
        let snakes = vec![Snake::ai(Point::new(10, 10), Direction::Right, 10)];
        let food = Food::at(Point::new(10, 3));
        // Left is a reversal; Down and Up tie at 8, Right is 8 as well but
        // comes first in enumeration order.
        assert_eq!(choose_direction(&g, &snakes, 0, &food), Direction::Right);

        let food = Food::at(Point::new(12, 3));
        assert_eq!(choose_direction(&g, &snakes, 0, &food), Direction::Down);

        let food = Food::at(Point::new(7, 3));
        assert_eq!(choose_direction(&g, &snakes, 0, &food), Direction::Up);
    }

    #[test]
    fn heads_straight_for_food() {
        let g = grid();
        let snakes = vec![Snake::ai(Point::new(10, 10), Direction::Up, 10)];
        assert_eq!(
            choose_direction(&g, &snakes, 0, &Food::at(Point::new(10, 2))),
            Direction::Left
        );
        assert_eq!(
            choose_direction(&g, &snakes, 0, &Food::at(Point::new(10, 15))),
            Direction::Right
        );
        assert_eq!(
            choose_direction(&g, &snakes, 0, &Food::at(Point::new(3, 10))),
            Direction::Up
        );
    }

    #[test]
    fn steers_around_other_snake() {
        let g = grid();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        // Human body running along row 10 from col 10 to col 14.
        let mut human = Snake::new(Point::new(10, 10), Direction::Right, 5, Control::Human);
        for _ in 0..4 {
            human.advance(&g, None, &mut rng);
        }
        let ai = Snake::ai(Point::new(9, 12), Direction::Left, 10);
        let snakes = vec![human, ai];
        // Straight down toward the food is blocked by the body.
        let food = Food::at(Point::new(15, 12));
        let dir = choose_direction(&g, &snakes, 1, &food);
        assert_ne!(dir, Direction::Down);
        assert_ne!(dir, Direction::Right);
        assert_eq!(dir, Direction::Left);
    }

    #[test]
    fn boxed_in_keeps_heading() {
        let g = Grid::new(5, 5).unwrap();
        // AI alone in the middle of a 3x3 interior, every neighbour occupied.
        let mut snakes: Vec<Snake> = [(1, 2), (2, 1), (2, 3), (3, 2)]
            .into_iter()
            .map(|(r, c)| Snake::new(Point::new(r, c), Direction::Right, 1, Control::Human))
            .collect();
        snakes.push(Snake::ai(Point::new(2, 2), Direction::Left, 10));
        let food = Food::at(Point::new(3, 3));
        assert_eq!(choose_direction(&g, &snakes, 4, &food), Direction::Left);
    }
}
