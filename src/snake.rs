use std::collections::VecDeque;
use std::ops::Range;

use rand::Rng;

use crate::{Direction, Grid, Point};

pub const INITIAL_LENGTH: usize = 5;
/// Segments added per food eaten.
pub const GROWTH: usize = 3;
pub const MAX_DIFFICULTY: u8 = 10;

/// Who steers a snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Human,
    /// Accepts the policy's heading with probability `difficulty / 10` per tick.
    Ai { difficulty: u8 },
}

impl Control {
    pub fn ai(difficulty: u8) -> Self {
        Self::Ai {
            difficulty: difficulty.min(MAX_DIFFICULTY),
        }
    }

    pub fn is_ai(self) -> bool {
        matches!(self, Self::Ai { .. })
    }
}

/// Heading after one tick of steering.
///
/// Humans may turn anywhere except straight back. AI snakes take the requested
/// heading only when `roll` (uniform in `0..10`) is below their difficulty;
/// their policy never requests a reversal in the first place.
pub fn resolve_heading(
    current: Direction,
    requested: Option<Direction>,
    control: Control,
    roll: u8,
) -> Direction {
    match (control, requested) {
        (Control::Human, Some(dir)) if !dir.is_opposite(current) => dir,
        (Control::Ai { difficulty }, Some(dir)) if roll < difficulty => dir,
        _ => current,
    }
}

/// Body segments are stored tail first: `positions.back()` is the head.
///
/// Growth stacks copies of the tail segment, so the front of the deque may
/// hold several identical points until the body has moved off them.
#[derive(Debug, Clone)]
pub struct Snake {
    direction: Direction,
    positions: VecDeque<Point>,
    score: u32,
    dead: bool,
    control: Control,
}

impl Snake {
    pub fn new(start: Point, direction: Direction, length: usize, control: Control) -> Self {
        Self {
            direction,
            positions: std::iter::repeat_n(start, length.max(1)).collect(),
            score: 0,
            dead: false,
            control,
        }
    }

    pub fn human(start: Point, direction: Direction) -> Self {
        Self::new(start, direction, INITIAL_LENGTH, Control::Human)
    }

    pub fn ai(start: Point, direction: Direction, difficulty: u8) -> Self {
        Self::new(start, direction, INITIAL_LENGTH, Control::ai(difficulty))
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn control(&self) -> Control {
        self.control
    }

    pub fn is_ai(&self) -> bool {
        self.control.is_ai()
    }

    /// Number of segments, stacked duplicates included.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Segments from oldest (tail) to newest (head).
    pub fn positions(&self) -> impl Iterator<Item = &Point> {
        self.positions.iter()
    }

    pub fn current_position(&self) -> Point {
        *self.positions.back().expect("snake is non-empty")
    }

    /// Any segment, stacked or not, sits on `p`.
    pub fn occupies(&self, p: Point) -> bool {
        self.positions.contains(&p)
    }

    /// Cell the head would reach heading `dir`.
    pub fn next_position(&self, grid: &Grid, dir: Direction) -> Point {
        grid.step(self.current_position(), dir)
    }

    /// Steer, then advance one cell. Body length is unchanged.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        requested: Option<Direction>,
        rng: &mut R,
    ) {
        let roll = match self.control {
            Control::Ai { .. } => rng.random_range(0..MAX_DIFFICULTY),
            Control::Human => 0,
        };
        self.direction = resolve_heading(self.direction, requested, self.control, roll);

        let head = self.next_position(grid, self.direction);
        self.positions.push_back(head);
        self.positions.pop_front();
    }

    /// Deferred growth: the next `n` moves leave the tail in place.
    pub fn increase_length(&mut self, n: usize) {
        let tail = *self.positions.front().expect("snake is non-empty");
        for _ in 0..n {
            self.positions.push_front(tail);
        }
    }

    pub fn increase_score(&mut self, n: u32) {
        self.score = self.score.saturating_add(n);
    }

    pub(crate) fn kill(&mut self) {
        self.dead = true;
    }

    /// Collidable body: stacked tail copies collapsed into one, and the head
    /// left out when `is_self` (a head never collides with itself).
    pub fn real_positions(&self, is_self: bool) -> impl Iterator<Item = &Point> {
        self.positions.range(self.real_range(is_self))
    }

    fn real_range(&self, is_self: bool) -> Range<usize> {
        let trim = if is_self { 2 } else { 1 };
        let Some(last) = self.positions.len().checked_sub(trim) else {
            return 0..0;
        };
        let start = (0..last)
            .find(|&i| self.positions[i] != self.positions[i + 1])
            .unwrap_or(last);
        start..last + 1
    }

    /// `p` is part of the collidable body.
    pub fn collides_at(&self, p: Point, is_self: bool) -> bool {
        self.real_positions(is_self).any(|&s| s == p)
    }
}
