//! Keyboard mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A user command decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Flip the cell under the cursor.
    Toggle,
    /// Start the simulation, or pause it when running.
    Run,
    Save,
    Load,
    Quit,
}

impl Command {
    /// Decode a key event. Releases and unmapped keys yield `None`.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            // Raw mode swallows SIGINT, so Ctrl-C arrives as a key
            return match key.code {
                KeyCode::Char('c' | 'C') => Some(Command::Quit),
                _ => None,
            };
        }

        let command = match key.code {
            KeyCode::Up => Command::Move(Direction::Up),
            KeyCode::Down => Command::Move(Direction::Down),
            KeyCode::Left => Command::Move(Direction::Left),
            KeyCode::Right => Command::Move(Direction::Right),
            KeyCode::Char('x' | 'X' | 'o' | 'O') => Command::Toggle,
            KeyCode::Char('r' | 'R' | ' ') => Command::Run,
            KeyCode::Char('s' | 'S') => Command::Save,
            KeyCode::Char('l' | 'L') => Command::Load,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_edit_keys() {
        assert_eq!(
            Command::from_key(press(KeyCode::Left)),
            Some(Command::Move(Direction::Left))
        );
        for c in ['x', 'X', 'o', 'O'] {
            assert_eq!(Command::from_key(press(KeyCode::Char(c))), Some(Command::Toggle));
        }
        assert_eq!(Command::from_key(press(KeyCode::Char('S'))), Some(Command::Save));
        assert_eq!(Command::from_key(press(KeyCode::Char('l'))), Some(Command::Load));
        assert_eq!(Command::from_key(press(KeyCode::Char('r'))), Some(Command::Run));
    }

    #[test]
    fn test_shifted_letters() {
        let key = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(Command::from_key(key), Some(Command::Run));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(Command::from_key(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(Command::from_key(press(KeyCode::Char('q'))), Some(Command::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key(ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn test_ignored_keys() {
        assert_eq!(Command::from_key(press(KeyCode::Char('c'))), None);
        assert_eq!(Command::from_key(press(KeyCode::Enter)), None);
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key(ctrl_s), None);

        let mut release = press(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        assert_eq!(Command::from_key(release), None);
    }
}
