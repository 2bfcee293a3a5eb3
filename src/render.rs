//! Glyph buffer for the board and the frames built from it.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::{Food, Game, Grid, Snake};

/// Snake colors by index, wrapping for larger games.
pub const PALETTE: [Color; 4] = [Color::Cyan, Color::Yellow, Color::Magenta, Color::Green];

pub fn snake_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// One cell of the board. Snake glyphs carry the snake's index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Blank,
    Wall(char),
    Head(usize),
    DeadHead(usize),
    Body(usize),
    Tail(usize),
    Food,
}

impl Glyph {
    pub fn symbol(self) -> char {
        match self {
            Self::Blank => ' ',
            Self::Wall(c) => c,
            Self::Head(_) => 'Ö',
            Self::DeadHead(_) => 'X',
            Self::Body(_) => '0',
            Self::Tail(_) => 'o',
            Self::Food => '©',
        }
    }

    pub fn style(self) -> Style {
        match self {
            Self::Blank | Self::Wall(_) => Style::default(),
            Self::Head(i) | Self::DeadHead(i) => Style::default()
                .fg(snake_color(i))
                .add_modifier(Modifier::BOLD),
            Self::Body(i) | Self::Tail(i) => Style::default().fg(snake_color(i)),
            Self::Food => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

/// Walls plus interior, `height` rows of `width` cells.
#[derive(Debug, Clone)]
pub struct Board {
    rows: Vec<Vec<Glyph>>,
}

impl Board {
    pub fn new(grid: &Grid) -> Self {
        let w = grid.width() as usize;
        let h = grid.height() as usize;
        let edge = |left, right| {
            let mut row = vec![Glyph::Wall('─'); w];
            row[0] = Glyph::Wall(left);
            row[w - 1] = Glyph::Wall(right);
            row
        };

        let mut rows = Vec::with_capacity(h);
        rows.push(edge('┌', '┐'));
        for _ in 0..h - 2 {
            let mut row = vec![Glyph::Blank; w];
            row[0] = Glyph::Wall('│');
            row[w - 1] = Glyph::Wall('│');
            rows.push(row);
        }
        rows.push(edge('└', '┘'));
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Glyph>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Glyph> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Blank every interior cell, leaving the walls.
    pub fn clear(&mut self) {
        let h = self.rows.len();
        for row in &mut self.rows[1..h - 1] {
            let w = row.len();
            row[1..w - 1].fill(Glyph::Blank);
        }
    }

    /// Paint snakes (dead ones on top) and then the food.
    pub fn draw(&mut self, snakes: &[Snake], food: &Food) {
        let live = snakes.iter().enumerate().filter(|(_, s)| !s.is_dead());
        let dead = snakes.iter().enumerate().filter(|(_, s)| s.is_dead());
        for (i, snake) in live.chain(dead) {
            let last = snake.len() - 1;
            for (n, p) in snake.positions().enumerate() {
                let glyph = if n == last {
                    if snake.is_dead() {
                        Glyph::DeadHead(i)
                    } else {
                        Glyph::Head(i)
                    }
                } else if n == 0 {
                    Glyph::Tail(i)
                } else {
                    Glyph::Body(i)
                };
                self.put(p.row as usize, p.col as usize, glyph);
            }
        }
        let p = food.position();
        self.put(p.row as usize, p.col as usize, Glyph::Food);
    }

    fn put(&mut self, row: usize, col: usize, glyph: Glyph) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = glyph;
        }
    }

    /// Board as plain text, one line per row.
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.iter().map(|g| g.symbol()).collect::<String>())
            .collect::<Vec<String>>()
            .join("\n")
    }
}

fn score_line(index: usize, snake: &Snake) -> String {
    format!("Snake {} Score: {}", index + 1, snake.score())
}

/// Uncolored frame: board, a blank line, then one score line per snake.
pub fn frame_text(game: &Game) -> String {
    let mut out = game.board().to_text();
    out.push('\n');
    for (i, snake) in game.snakes().iter().enumerate() {
        out.push('\n');
        out.push_str(&score_line(i, snake));
    }
    out
}

/// Same frame as [`frame_text`], styled for the terminal.
pub fn frame_lines(game: &Game) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = game
        .board()
        .rows()
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|g| Span::styled(g.symbol().to_string(), g.style()))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    lines.push(Line::default());
    for (i, snake) in game.snakes().iter().enumerate() {
        lines.push(Line::styled(
            score_line(i, snake),
            Style::default().fg(snake_color(i)),
        ));
    }
    lines
}
