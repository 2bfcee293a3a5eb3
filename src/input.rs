use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::Direction;

/// What a tick sees of the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyAction {
    Turn(Direction),
    Quit,
    #[default]
    None,
}

pub fn decode(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::None;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        KeyCode::Up | KeyCode::Char('k') => KeyAction::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => KeyAction::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => KeyAction::Turn(Direction::Right),

        _ => KeyAction::None,
    }
}

/// Fold the keys pressed since the last tick: quit wins, otherwise the
/// latest turn.
pub fn merge(actions: impl IntoIterator<Item = KeyAction>) -> KeyAction {
    actions
        .into_iter()
        .fold(KeyAction::None, |acc, next| match (acc, next) {
            (KeyAction::Quit, _) | (_, KeyAction::Quit) => KeyAction::Quit,
            (acc, KeyAction::None) => acc,
            (_, turn) => turn,
        })
}

/// Drain pending terminal events without blocking.
pub fn poll_action() -> io::Result<KeyAction> {
    let mut pressed = Vec::new();
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            pressed.push(decode(key));
        }
    }
    Ok(merge(pressed))
}
