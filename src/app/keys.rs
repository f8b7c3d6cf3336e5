//! Mapping of crossterm key events onto engine keys.

use crate::input::Key;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One decoded tty event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtyInput {
    Key(Key),
    /// Ctrl-R: rerun the boot sequence
    Rerun,
    /// Ctrl-C, Ctrl-D or end of input
    Quit,
}

/// Translate a terminal event. Resizes, mouse and focus events, key
/// releases and unbound shortcuts yield `None`.
pub fn map_event(event: &Event) -> Option<TtyInput> {
    match event {
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

pub fn map_key(key: &KeyEvent) -> Option<TtyInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(TtyInput::Quit),
            KeyCode::Char('r') => Some(TtyInput::Rerun),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Char(ch) => Some(TtyInput::Key(Key::Char(ch))),
        KeyCode::Backspace => Some(TtyInput::Key(Key::Backspace)),
        KeyCode::Enter => Some(TtyInput::Key(Key::Enter)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(ch: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_printable_and_editing_keys() {
        assert_eq!(
            map_event(&press(KeyCode::Char('h'))),
            Some(TtyInput::Key(Key::Char('h')))
        );
        assert_eq!(
            map_event(&Event::Key(KeyEvent::new(
                KeyCode::Char('H'),
                KeyModifiers::SHIFT
            ))),
            Some(TtyInput::Key(Key::Char('H')))
        );
        assert_eq!(
            map_event(&press(KeyCode::Char('é'))),
            Some(TtyInput::Key(Key::Char('é')))
        );
        assert_eq!(
            map_event(&press(KeyCode::Backspace)),
            Some(TtyInput::Key(Key::Backspace))
        );
        assert_eq!(
            map_event(&press(KeyCode::Enter)),
            Some(TtyInput::Key(Key::Enter))
        );
    }

    #[test]
    fn test_ctrl_shortcuts() {
        assert_eq!(map_event(&ctrl('r')), Some(TtyInput::Rerun));
        assert_eq!(map_event(&ctrl('c')), Some(TtyInput::Quit));
        assert_eq!(map_event(&ctrl('d')), Some(TtyInput::Quit));
        assert_eq!(map_event(&ctrl('a')), None);
    }

    #[test]
    fn test_unbound_keys_are_dropped() {
        assert_eq!(map_event(&press(KeyCode::Up)), None);
        assert_eq!(map_event(&press(KeyCode::F(1))), None);
        assert_eq!(map_event(&press(KeyCode::Esc)), None);
        assert_eq!(
            map_event(&Event::Key(KeyEvent::new(
                KeyCode::Char('x'),
                KeyModifiers::ALT
            ))),
            None
        );
        assert_eq!(map_event(&Event::Resize(80, 24)), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(&key), None);
    }
}
