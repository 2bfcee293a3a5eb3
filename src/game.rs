use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::input::KeyAction;
use crate::render::Board;
use crate::{Direction, Food, Grid, Point, Settings, Snake, SnakeError, ai};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Over,
}

/// How a round ended. Snake numbers in messages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Quit requested.
    Exited,
    /// The only snake died.
    YouLost,
    /// One of two snakes died; `winner` is the survivor's index.
    Won { winner: usize },
    /// Every dead snake's index, in snake order.
    Lost { losers: Vec<usize> },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited => write!(f, "Exiting..."),
            Self::YouLost => write!(f, "You lost"),
            Self::Won { winner } => write!(f, "Snake {} won", winner + 1),
            Self::Lost { losers } => {
                let lines: Vec<String> = losers
                    .iter()
                    .map(|i| format!("Snake {} lost", i + 1))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
        }
    }
}

/// UI-agnostic summary of a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Snakes whose head landed on the food this tick.
    pub ate: Vec<usize>,
    /// Snakes that died this tick.
    pub died: Vec<usize>,
    pub status: GameStatus,
}

impl TickReport {
    fn idle(status: GameStatus) -> Self {
        Self {
            ate: Vec::new(),
            died: Vec::new(),
            status,
        }
    }
}

#[derive(Debug)]
pub struct Game {
    grid: Grid,
    board: Board,
    snakes: Vec<Snake>,
    food: Food,
    rng: ChaCha8Rng,
    should_close: bool,
    status: GameStatus,
    ticks: u64,
}

impl Game {
    /// A round with the given snakes. Food is placed off every snake.
    pub fn new(grid: Grid, snakes: Vec<Snake>, mut rng: ChaCha8Rng) -> Result<Self, SnakeError> {
        if snakes.is_empty() {
            return Err(SnakeError::NoSnakes);
        }
        if let Some(point) = snakes
            .iter()
            .flat_map(|s| s.positions())
            .find(|&&p| !grid.contains(p))
        {
            return Err(SnakeError::OutOfBounds { point: *point });
        }

        let food = Food::spawn(&grid, &snakes, &mut rng);
        let mut game = Self {
            grid,
            board: Board::new(&grid),
            snakes,
            food,
            rng,
            should_close: false,
            status: GameStatus::Running,
            ticks: 0,
        };
        game.redraw();
        info!(
            width = grid.width(),
            height = grid.height(),
            snakes = game.snakes.len(),
            food = %game.food.position(),
            "game started"
        );
        Ok(game)
    }

    /// Human on the left heading right, AI on the right heading left.
    pub fn duel(settings: &Settings, rng: ChaCha8Rng) -> Result<Self, SnakeError> {
        let grid = settings.grid()?;
        let (w, h) = (grid.width(), grid.height());
        let snakes = vec![
            Snake::human(Point::new(h / 2, w / 4), Direction::Right),
            Snake::ai(Point::new(h / 2, 3 * w / 4), Direction::Left, settings.difficulty),
        ];
        Self::new(grid, snakes, rng)
    }

    pub fn duel_with_seed(settings: &Settings, seed: u64) -> Result<Self, SnakeError> {
        Self::duel(settings, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[cfg(test)]
    pub(crate) fn snakes_mut(&mut self) -> &mut [Snake] {
        &mut self.snakes
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Food) {
        self.food = food;
    }

    /// Advance the round by one tick.
    pub fn tick(&mut self, action: KeyAction) -> TickReport {
        if self.status == GameStatus::Over {
            return TickReport::idle(self.status);
        }

        let pressed = match action {
            KeyAction::Quit => {
                debug!("quit requested");
                self.should_close = true;
                self.status = GameStatus::Over;
                return TickReport::idle(self.status);
            }
            KeyAction::Turn(dir) => Some(dir),
            KeyAction::None => None,
        };

        self.ticks += 1;
        self.update_snakes(pressed);
        let ate = self.update_food();
        let died = self.update_deaths();
        self.redraw();

        if self.outcome().is_some() {
            self.status = GameStatus::Over;
        }
        TickReport {
            ate,
            died,
            status: self.status,
        }
    }

    fn update_snakes(&mut self, pressed: Option<Direction>) {
        for i in 0..self.snakes.len() {
            let requested = if self.snakes[i].is_ai() {
                Some(ai::choose_direction(&self.grid, &self.snakes, i, &self.food))
            } else {
                pressed
            };
            self.snakes[i].advance(&self.grid, requested, &mut self.rng);
        }
    }

    /// Each head on the food grows and scores; the food then re-rolls off
    /// every body before the next snake is checked.
    fn update_food(&mut self) -> Vec<usize> {
        let mut ate = Vec::new();
        for i in 0..self.snakes.len() {
            if self.snakes[i].current_position() != self.food.position() {
                continue;
            }
            let reward = self.food.score();
            let snake = &mut self.snakes[i];
            snake.increase_length(crate::snake::GROWTH);
            snake.increase_score(reward);
            debug!(snake = i + 1, score = snake.score(), len = snake.len(), "food eaten");
            ate.push(i);
            self.food.respawn(&self.grid, &self.snakes, &mut self.rng);
        }
        ate
    }

    /// Collisions are judged on everyone's post-move body at once, so
    /// head-on crashes kill both snakes in the same tick.
    fn update_deaths(&mut self) -> Vec<usize> {
        let hit: Vec<usize> = self
            .snakes
            .iter()
            .enumerate()
            .filter(|(i, snake)| {
                let head = snake.current_position();
                self.snakes
                    .iter()
                    .enumerate()
                    .any(|(j, other)| other.collides_at(head, *i == j))
            })
            .map(|(i, _)| i)
            .collect();

        let mut died = Vec::new();
        for &i in &hit {
            if !self.snakes[i].is_dead() {
                debug!(snake = i + 1, at = %self.snakes[i].current_position(), "snake died");
                self.snakes[i].kill();
                died.push(i);
            }
        }
        died
    }

    fn redraw(&mut self) {
        self.board.clear();
        self.board.draw(&self.snakes, &self.food);
    }

    /// `Some` once the round is over.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.should_close {
            return Some(Outcome::Exited);
        }

        let losers: Vec<usize> = self
            .snakes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_dead())
            .map(|(i, _)| i)
            .collect();

        match (self.snakes.len(), losers.as_slice()) {
            (_, []) => None,
            (1, _) => Some(Outcome::YouLost),
            (2, [dead]) => Some(Outcome::Won { winner: 1 - dead }),
            _ => Some(Outcome::Lost { losers }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Control;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn solo(start: Point, dir: Direction) -> Game {
        let grid = Grid::new(10, 10).unwrap();
        Game::new(grid, vec![Snake::human(start, dir)], rng()).unwrap()
    }

    #[test]
    fn rejects_empty_and_misplaced_snakes() {
        let grid = Grid::new(10, 10).unwrap();
        assert_eq!(
            Game::new(grid, Vec::new(), rng()).unwrap_err(),
            SnakeError::NoSnakes
        );
        let wall = Snake::human(Point::new(0, 3), Direction::Right);
        assert_eq!(
            Game::new(grid, vec![wall], rng()).unwrap_err(),
            SnakeError::OutOfBounds {
                point: Point::new(0, 3)
            }
        );
    }

    #[test]
    fn quit_ends_tick_without_moving() {
        let mut g = solo(Point::new(5, 5), Direction::Right);
        let report = g.tick(KeyAction::Quit);
        assert_eq!(report.status, GameStatus::Over);
        assert_eq!(g.snakes()[0].current_position(), Point::new(5, 5));
        assert_eq!(g.outcome(), Some(Outcome::Exited));
        assert_eq!(g.ticks(), 0);
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut g = solo(Point::new(5, 5), Direction::Right);
        g.set_food(Food::at(Point::new(5, 6)));
        let report = g.tick(KeyAction::None);
        assert_eq!(report.ate, vec![0]);
        let s = &g.snakes()[0];
        assert_eq!(s.score(), crate::food::FOOD_SCORE);
        assert_eq!(s.len(), crate::snake::INITIAL_LENGTH + crate::snake::GROWTH);
        assert!(!s.occupies(g.food().position()));
        assert_eq!(g.status(), GameStatus::Running);
    }

    #[test]
    fn only_the_first_head_gets_the_food() {
        let grid = Grid::new(12, 12).unwrap();
        let snakes = vec![
            Snake::human(Point::new(5, 5), Direction::Right),
            Snake::new(Point::new(5, 7), Direction::Left, 5, Control::Human),
        ];
        let mut g = Game::new(grid, snakes, rng()).unwrap();
        g.set_food(Food::at(Point::new(5, 6)));
        // Both humans share the pressed key (None): they meet on the food.
        let report = g.tick(KeyAction::None);
        assert_eq!(report.ate, vec![0]);
        assert_eq!(report.died, vec![0, 1]);
    }

    #[test]
    fn self_collision_kills_on_the_same_tick() {
        let grid = Grid::new(12, 12).unwrap();
        let snake = Snake::new(Point::new(5, 2), Direction::Right, 6, Control::Human);
        let mut g = Game::new(grid, vec![snake], rng()).unwrap();
        g.set_food(Food::at(Point::new(10, 10)));
        for _ in 0..6 {
            g.tick(KeyAction::None);
        }
        g.tick(KeyAction::Turn(Direction::Down));
        g.tick(KeyAction::Turn(Direction::Left));
        assert!(!g.snakes()[0].is_dead());
        let report = g.tick(KeyAction::Turn(Direction::Up));
        assert_eq!(report.died, vec![0]);
        assert_eq!(g.outcome(), Some(Outcome::YouLost));
        assert_eq!(g.outcome().unwrap().to_string(), "You lost");
    }

    #[test]
    fn over_game_ignores_ticks() {
        let mut g = solo(Point::new(5, 5), Direction::Right);
        g.snakes_mut()[0].kill();
        g.tick(KeyAction::None);
        assert_eq!(g.status(), GameStatus::Over);
        let before = g.snakes()[0].current_position();
        let report = g.tick(KeyAction::None);
        assert_eq!(report, TickReport::idle(GameStatus::Over));
        assert_eq!(g.snakes()[0].current_position(), before);
    }

    #[test]
    fn lone_snake_circles_without_dying() {
        let mut g = solo(Point::new(5, 5), Direction::Right);
        g.set_food(Food::at(Point::new(2, 2)));
        for _ in 0..50 {
            let report = g.tick(KeyAction::None);
            assert!(report.died.is_empty());
            let s = &g.snakes()[0];
            assert!(!s.is_dead());
            assert_eq!(s.score(), 0);
            assert_eq!(s.current_position().row, 5);
        }
        assert_eq!(g.status(), GameStatus::Running);
        assert_eq!(g.outcome(), None);
        assert_eq!(g.ticks(), 50);
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(Outcome::Exited.to_string(), "Exiting...");
        assert_eq!(Outcome::Won { winner: 1 }.to_string(), "Snake 2 won");
        assert_eq!(
            Outcome::Lost {
                losers: vec![0, 2]
            }
            .to_string(),
            "Snake 1 lost\nSnake 3 lost"
        );
    }

    #[test]
    fn board_tracks_positions() {
        let mut g = solo(Point::new(5, 5), Direction::Right);
        g.set_food(Food::at(Point::new(2, 2)));
        g.tick(KeyAction::None);
        let text = g.board().to_text();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[5].chars().nth(6), Some('Ö'));
        assert_eq!(rows[5].chars().nth(5), Some('0'));
        assert_eq!(rows[2].chars().nth(2), Some('©'));
    }
}
