//! Key bindings for the interactive field.
//!
//! Maps crossterm KeyEvents to field actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// An action resulting from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Type a character at the cursor.
    InsertChar(char),
    /// Delete the selection, or the char before the cursor.
    Backspace,
    /// Delete the selection, or the char after the cursor.
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Toggle insert/overtype mode.
    ToggleMode,
    /// Accept the field value.
    Accept,
    /// Leave without accepting.
    Cancel,
    /// Terminal was resized.
    Resize,
    /// No action (ignore the key).
    Ignore,
}

/// Resolve a KeyEvent to a KeyAction.
pub fn resolve_key(key: KeyEvent) -> KeyAction {
    // F63 is our resize sentinel from CrosstermTerminal
    if key.code == KeyCode::F(63) && key.modifiers == KeyModifiers::NONE {
        return KeyAction::Resize;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => KeyAction::Cancel,
            KeyCode::Char('a') => KeyAction::Home,
            KeyCode::Char('e') => KeyAction::End,
            _ => KeyAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Left => KeyAction::Left,
        KeyCode::Right => KeyAction::Right,
        KeyCode::Home => KeyAction::Home,
        KeyCode::End => KeyAction::End,
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Delete => KeyAction::Delete,
        KeyCode::Insert => KeyAction::ToggleMode,
        KeyCode::Enter => KeyAction::Accept,
        KeyCode::Esc => KeyAction::Cancel,
        KeyCode::Char(ch) => KeyAction::InsertChar(ch),
        _ => KeyAction::Ignore,
    }
}
