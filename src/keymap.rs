use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::Intent;

/// What a key press means to the front-end.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyAction {
    /// Forwarded to the mode controller.
    Intent(Intent),
    /// Leaves the program from any screen.
    Quit,
}

/// Maps one key event to an action. Releases and repeats are ignored.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c' | 'C')).then_some(KeyAction::Quit);
    }

    let intent = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Intent::MoveUp,
        KeyCode::Down | KeyCode::Char('s' | 'S') => Intent::MoveDown,
        KeyCode::Left | KeyCode::Char('a' | 'A') => Intent::MoveLeft,
        KeyCode::Right | KeyCode::Char('d' | 'D') => Intent::MoveRight,
        KeyCode::Char('p' | 'P') => Intent::Pause,
        KeyCode::Enter | KeyCode::Char(' ') => Intent::Confirm,
        KeyCode::Esc | KeyCode::Backspace => Intent::Cancel,
        KeyCode::Char('r' | 'R') => Intent::Restart,
        KeyCode::Char('q' | 'Q') => return Some(KeyAction::Quit),
        _ => return None,
    };

    Some(KeyAction::Intent(intent))
}

/// Drains pending terminal events, waiting at most `timeout` for the first.
///
/// Returns the first meaningful action; a quit always wins over an intent
/// queued in the same frame.
pub fn poll_action(timeout: Duration) -> io::Result<Option<KeyAction>> {
    let mut action = None;
    let mut wait = timeout;

    while event::poll(wait)? {
        wait = Duration::ZERO;

        let Event::Key(key) = event::read()? else {
            continue;
        };

        match map_key(key) {
            Some(KeyAction::Quit) => return Ok(Some(KeyAction::Quit)),
            Some(mapped) if action.is_none() => action = Some(mapped),
            _ => {}
        }
    }

    Ok(action)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use crate::input::Intent;

    use super::{KeyAction, map_key};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(
            map_key(press(KeyCode::Up)),
            Some(KeyAction::Intent(Intent::MoveUp))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(KeyAction::Intent(Intent::MoveLeft))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('D'))),
            Some(KeyAction::Intent(Intent::MoveRight))
        );
    }

    #[test]
    fn menu_keys_map_to_intents() {
        assert_eq!(
            map_key(press(KeyCode::Enter)),
            Some(KeyAction::Intent(Intent::Confirm))
        );
        assert_eq!(
            map_key(press(KeyCode::Esc)),
            Some(KeyAction::Intent(Intent::Cancel))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('r'))),
            Some(KeyAction::Intent(Intent::Restart))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('p'))),
            Some(KeyAction::Intent(Intent::Pause))
        );
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;

        assert_eq!(map_key(release), None);
        assert_eq!(map_key(press(KeyCode::Tab)), None);
    }
}
