//! Input boundary: discrete key-down events
//!
//! Bindings are fixed. Key releases are ignored, and auto-repeated presses
//! are flagged so rotate and hold can skip them.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Rotate,
    Hold,
    SoftDrop,
    MoveLeft,
    MoveRight,
    HardDrop,
    Confirm,
    Cancel,
}

/// One event delivered to the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key: Key, repeat: bool },
    /// Request to close the game (window close, Ctrl-C, Q)
    Terminate,
}

impl InputEvent {
    pub fn press(key: Key) -> Self {
        InputEvent::KeyDown { key, repeat: false }
    }

    pub fn repeat(key: Key) -> Self {
        InputEvent::KeyDown { key, repeat: true }
    }
}

/// Translate a terminal event, `None` for anything unbound
pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    let repeat = match key.kind {
        KeyEventKind::Press => false,
        KeyEventKind::Repeat => true,
        KeyEventKind::Release => return None,
    };

    // Handle Ctrl+C for quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Terminate);
    }

    let key = match normalize_key(key.code) {
        KeyCode::Up => Key::Rotate,
        KeyCode::Char('c') => Key::Hold,
        KeyCode::Down => Key::SoftDrop,
        KeyCode::Left => Key::MoveLeft,
        KeyCode::Right => Key::MoveRight,
        KeyCode::Char(' ') => Key::HardDrop,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Esc => Key::Cancel,
        KeyCode::Char('q') => return Some(InputEvent::Terminate),
        _ => return None,
    };
    Some(InputEvent::KeyDown { key, repeat })
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        event(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn test_bindings() {
        assert_eq!(translate(&press(KeyCode::Up)), Some(InputEvent::press(Key::Rotate)));
        assert_eq!(translate(&press(KeyCode::Char('C'))), Some(InputEvent::press(Key::Hold)));
        assert_eq!(translate(&press(KeyCode::Char(' '))), Some(InputEvent::press(Key::HardDrop)));
        assert_eq!(translate(&press(KeyCode::Enter)), Some(InputEvent::press(Key::Confirm)));
        assert_eq!(translate(&press(KeyCode::Esc)), Some(InputEvent::press(Key::Cancel)));
        assert_eq!(translate(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_terminate_requests() {
        assert_eq!(translate(&press(KeyCode::Char('q'))), Some(InputEvent::Terminate));
        let ctrl_c = event(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(translate(&ctrl_c), Some(InputEvent::Terminate));
    }

    #[test]
    fn test_repeat_and_release() {
        let held = event(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Repeat);
        assert_eq!(translate(&held), Some(InputEvent::repeat(Key::MoveLeft)));
        let released = event(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(translate(&released), None);
    }
}
