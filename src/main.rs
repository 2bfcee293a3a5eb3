use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use duel_snake::render::{frame_lines, frame_text};
use duel_snake::{Cli, Game, Outcome, Settings, input};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    style::Stylize,
    widgets::{Block, Borders, Paragraph},
};

fn main() -> Result<()> {
    let settings = Settings::from(Cli::parse());
    init_logging(&settings)?;

    let rng = match settings.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };
    let mut game = Game::duel(&settings, rng)?;

    let outcome = {
        let _screen = RawScreen::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend).context("failed to build terminal backend")?;
        terminal.clear()?;
        run(&mut terminal, &mut game, &settings)?
    };

    info!(%outcome, ticks = game.ticks(), "game over");
    println!("{}", frame_text(&game));
    println!("{outcome}");
    Ok(())
}

/// Raw mode on the alternate screen with the cursor hidden, undone on drop so
/// every early return and panic still hands the shell back intact.
struct RawScreen;

impl RawScreen {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let screen = Self;
        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .context("failed to enter alternate screen")?;
        Ok(screen)
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        if let Err(err) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
            error!(?err, "failed to leave alternate screen");
        }
        if let Err(err) = disable_raw_mode() {
            error!(?err, "failed to disable raw mode");
        }
    }
}

fn init_logging(settings: &Settings) -> Result<()> {
    // The terminal belongs to the game; only log when asked to, and to a file.
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    settings: &Settings,
) -> Result<Outcome> {
    let tick_rate = settings.tick_interval();

    loop {
        // --- Input (non-blocking) ---
        let action = input::poll_action()?;

        // --- Tick ---
        game.tick(action);

        // --- Render ---
        let scores: Vec<String> = game
            .snakes()
            .iter()
            .map(|s| s.score().to_string())
            .collect();
        let title = format!(" duel snake: {} ", scores.join(" vs "));
        let frame = Paragraph::new(frame_lines(game))
            .block(Block::default().borders(Borders::NONE).title(title.bold()));
        terminal.draw(|f| f.render_widget(frame, f.area()))?;

        if let Some(outcome) = game.outcome() {
            return Ok(outcome);
        }

        thread::sleep(tick_rate);
    }
}
