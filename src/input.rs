//! Keyboard and close-signal handling.
//!
//! Turns terminal events into [`GameCommand`]s without ever blocking the
//! game loop.

use crate::error::Result;
use crate::game::GameCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Source of player commands, drained once per tick.
pub trait EventSource {
    /// Every command queued since the last call. Must not block.
    fn drain(&mut self) -> Result<Vec<GameCommand>>;
}

/// Map a key press to a game command.
///
/// `q`, `Q` and `Esc` quit; `Ctrl+C` is the terminal's close signal.
pub fn map_key(key: KeyEvent) -> GameCommand {
    if key.kind == KeyEventKind::Release {
        return GameCommand::Other;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameCommand::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => GameCommand::Quit,
        _ => GameCommand::Other,
    }
}

/// Reads crossterm's event queue.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn drain(&mut self) -> Result<Vec<GameCommand>> {
        let mut commands = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                commands.push(map_key(key));
            }
        }
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), GameCommand::Quit);
        assert_eq!(map_key(press(KeyCode::Char('Q'))), GameCommand::Quit);
        assert_eq!(map_key(press(KeyCode::Esc)), GameCommand::Quit);
    }

    #[test]
    fn test_ctrl_c_is_close_signal() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), GameCommand::Quit);
        assert_eq!(map_key(press(KeyCode::Char('c'))), GameCommand::Other);
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), GameCommand::Other);
        assert_eq!(map_key(press(KeyCode::Left)), GameCommand::Other);
    }

    #[test]
    fn test_release_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), GameCommand::Other);
    }
}
