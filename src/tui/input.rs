//! Key bindings.

use crate::tui::app::InputMode;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Up,
    Down,
    Approve,
    Reject,
    Reload,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    EndSearch,
    ClearSearch,
}

/// Map a key press to a command for the current input mode.
pub fn map_key(mode: InputMode, key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match mode {
        InputMode::Search => match key.code {
            KeyCode::Enter => Some(Command::EndSearch),
            KeyCode::Esc => Some(Command::ClearSearch),
            KeyCode::Backspace => Some(Command::SearchBackspace),
            KeyCode::Char(c) => Some(Command::SearchInput(c)),
            _ => None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::Down),
            KeyCode::Char('a') => Some(Command::Approve),
            KeyCode::Char('r') => Some(Command::Reject),
            KeyCode::Char('R') | KeyCode::F(5) => Some(Command::Reload),
            KeyCode::Char('/') => Some(Command::StartSearch),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_bindings() {
        let m = InputMode::Normal;
        assert_eq!(map_key(m, key(KeyCode::Char('a'))), Some(Command::Approve));
        assert_eq!(map_key(m, key(KeyCode::Char('r'))), Some(Command::Reject));
        assert_eq!(map_key(m, key(KeyCode::Char('R'))), Some(Command::Reload));
        assert_eq!(map_key(m, key(KeyCode::F(5))), Some(Command::Reload));
        assert_eq!(map_key(m, key(KeyCode::Char('j'))), Some(Command::Down));
        assert_eq!(map_key(m, key(KeyCode::Char('/'))), Some(Command::StartSearch));
        assert_eq!(map_key(m, key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_search_mode_captures_letters() {
        let m = InputMode::Search;
        assert_eq!(
            map_key(m, key(KeyCode::Char('a'))),
            Some(Command::SearchInput('a'))
        );
        assert_eq!(map_key(m, key(KeyCode::Enter)), Some(Command::EndSearch));
        assert_eq!(map_key(m, key(KeyCode::Esc)), Some(Command::ClearSearch));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(InputMode::Search, ctrl_c), Some(Command::Quit));
        assert_eq!(map_key(InputMode::Normal, ctrl_c), Some(Command::Quit));
    }
}
