//! Key mapping from terminal events to raw commands.

use crate::types::RawCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to a raw command.
///
/// Arrows, WASD and hjkl all produce directions; the active engine decides
/// what a direction means (Block-Stacker treats Up as rotate).
pub fn handle_key_event(key: KeyEvent) -> Option<RawCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Directions
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(RawCommand::Left),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(RawCommand::Right),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(RawCommand::Down),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(RawCommand::Up),

        // Block-Stacker actions
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(RawCommand::Rotate)
        }
        KeyCode::Char(' ') => Some(RawCommand::HardDrop),

        // Session
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(RawCommand::Start),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(RawCommand::Pause),
        KeyCode::Char('v') | KeyCode::Char('V') => Some(RawCommand::Save),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
