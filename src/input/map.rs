//! Key mapping from terminal events to game events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameEvent;

/// Map keyboard input to game events.
pub fn handle_key_event(key: KeyEvent) -> Option<GameEvent> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameEvent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameEvent::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameEvent::MoveDown),

        // Rotation
        KeyCode::Up | KeyCode::Char('r') | KeyCode::Char('R') => Some(GameEvent::Rotate),

        // New game (honored only after game over)
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameEvent::Restart),

        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
