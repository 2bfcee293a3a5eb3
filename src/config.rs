use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;

use crate::{Coord, Grid, SnakeError};

pub const DEFAULT_DIFFICULTY: u8 = 8;
pub const DEFAULT_WIDTH: Coord = 50;
pub const DEFAULT_HEIGHT: Coord = 25;
pub const DEFAULT_SPEED: u32 = 10;
pub const MAX_SPEED: u32 = 100;

// Numbers are taken as raw text so a malformed value falls back to the
// default instead of aborting.
#[derive(Debug, Parser)]
#[command(name = "duel-snake")]
#[command(version, about = "Terminal snake: you against a greedy AI snake")]
pub struct Cli {
    /// How often the AI follows its own plan, 0-10 [default: 8]
    #[arg(long, value_name = "0-10")]
    pub difficulty: Option<String>,

    /// Board width including walls [default: 50]
    #[arg(long, value_name = "WIDTH")]
    pub width: Option<String>,

    /// Board height including walls [default: 25]
    #[arg(long, value_name = "HEIGHT")]
    pub height: Option<String>,

    /// Ticks per second, 1-100 [default: 10]
    #[arg(long, value_name = "1-100")]
    pub speed: Option<String>,

    /// Seed for a reproducible round
    #[arg(long)]
    pub seed: Option<String>,

    /// Write a trace log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Resolved launch parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub difficulty: u8,
    pub width: Coord,
    pub height: Coord,
    pub speed: u32,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            speed: DEFAULT_SPEED,
            seed: None,
            log_file: None,
        }
    }
}

fn lenient<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        let difficulty: i64 = lenient(cli.difficulty.as_deref(), DEFAULT_DIFFICULTY.into());
        let speed: i64 = lenient(cli.speed.as_deref(), DEFAULT_SPEED.into());
        Self {
            difficulty: difficulty.clamp(0, 10) as u8,
            width: lenient(cli.width.as_deref(), DEFAULT_WIDTH),
            height: lenient(cli.height.as_deref(), DEFAULT_HEIGHT),
            speed: speed.clamp(1, MAX_SPEED.into()) as u32,
            seed: cli.seed.as_deref().and_then(|s| s.trim().parse().ok()),
            log_file: cli.log_file,
        }
    }
}

impl Settings {
    pub fn grid(&self) -> Result<Grid, SnakeError> {
        Grid::new(self.width, self.height)
    }

    /// Delay between ticks: `1000 / speed` ms.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed.max(1)))
    }
}
