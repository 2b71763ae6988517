//! Application event loop for the interactive field.
//!
//! The `App` struct ties together a `MaskEngine`, the terminal and the key
//! bindings. Every keystroke becomes a single replacement on the engine,
//! which reformats the field before it is redrawn.

use std::ops::Range;

use anyhow::Result;

use crate::edit_mode::EditMode;
use crate::engine::MaskEngine;
use crate::keybind::{self, KeyAction};
use crate::selection::Selection;
use crate::terminal::Terminal;

const FIELD_ROW: u16 = 2;
const STATUS_ROW: u16 = 4;
const HELP_ROW: u16 = 5;
const FIELD_PROMPT: &str = "> ";

/// How the user left the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    Accepted,
    Cancelled,
}

/// The interactive application state.
pub struct App {
    pub engine: MaskEngine,
    pub mode: EditMode,
    pub running: bool,
    outcome: FieldOutcome,
}

impl App {
    pub fn new(engine: MaskEngine) -> Self {
        Self {
            engine,
            mode: EditMode::Insert,
            running: true,
            outcome: FieldOutcome::Cancelled,
        }
    }

    /// Run the main event loop until the field is accepted or cancelled.
    pub fn run(&mut self, terminal: &mut dyn Terminal) -> Result<FieldOutcome> {
        terminal.init()?;
        let result = self.event_loop(terminal);
        terminal.cleanup()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut dyn Terminal) -> Result<FieldOutcome> {
        self.redraw(terminal);
        while self.running {
            let key = terminal.read_key()?;
            self.handle_action(keybind::resolve_key(key));
            self.redraw(terminal);
        }
        Ok(self.outcome)
    }

    /// Handle a resolved key action.
    pub fn handle_action(&mut self, action: KeyAction) {
        let len = self.engine.buffer().len_chars();
        let sel = self.engine.selection();
        let caret = sel.end;

        match action {
            KeyAction::InsertChar(ch) => self.handle_insert_char(ch),
            KeyAction::Backspace => {
                let range = if sel.is_cursor() {
                    caret.saturating_sub(1)..caret
                } else {
                    sel.range()
                };
                self.delete(range);
            }
            KeyAction::Delete => {
                let range = if sel.is_cursor() {
                    caret..(caret + 1).min(len)
                } else {
                    sel.range()
                };
                self.delete(range);
            }
            KeyAction::Left => self.move_cursor(caret.saturating_sub(1)),
            KeyAction::Right => self.move_cursor(caret + 1),
            KeyAction::Home => self.move_cursor(0),
            KeyAction::End => self.move_cursor(len),
            KeyAction::ToggleMode => self.mode = self.mode.toggled(),
            KeyAction::Accept => {
                self.outcome = FieldOutcome::Accepted;
                self.running = false;
            }
            KeyAction::Cancel => {
                self.outcome = FieldOutcome::Cancelled;
                self.running = false;
            }
            // Redrawn after every action anyway.
            KeyAction::Resize | KeyAction::Ignore => {}
        }
    }

    /// Type a character over the selection, or at the cursor.
    fn handle_insert_char(&mut self, ch: char) {
        let len = self.engine.buffer().len_chars();
        let sel = self.engine.selection();
        let range = match self.mode {
            _ if !sel.is_cursor() => sel.range(),
            EditMode::Insert => sel.end..sel.end,
            EditMode::Overtype => sel.end..(sel.end + 1).min(len),
        };
        let after = Selection::cursor(range.start + 1);
        self.engine.replace(range, &ch.to_string(), after);
    }

    fn move_cursor(&mut self, offset: usize) {
        self.engine.set_selection(Selection::cursor(offset));
    }

    fn delete(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let after = Selection::cursor(range.start);
        self.engine.replace(range, "", after);
    }

    /// Rows below the bottom of the terminal are skipped.
    fn redraw(&self, terminal: &mut dyn Terminal) {
        let status = format!("[{}] value: {}", self.mode.label(), self.engine.value(true));
        let rows = [
            (0, format!("Mask: {}", self.engine.template())),
            (FIELD_ROW, format!("{}{}", FIELD_PROMPT, self.engine.text())),
            (STATUS_ROW, status),
            (HELP_ROW, "Enter accepts, Esc cancels, Insert toggles overtype.".to_string()),
        ];

        let size = terminal.size();
        for (row, line) in rows {
            if row >= size.height {
                continue;
            }
            terminal.move_cursor(0, row);
            terminal.write_str(&clip(&line, size.width as usize));
            terminal.clear_eol();
        }

        let col = FIELD_PROMPT.len() + self.engine.selection().end;
        let row = FIELD_ROW.min(size.height.saturating_sub(1));
        terminal.move_cursor(col.min(u16::MAX as usize) as u16, row);
        terminal.flush();
    }
}

/// Truncate `s` to at most `width` chars.
fn clip(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::config::MaskConfig;
    use crate::terminal::{MockOp, MockTerminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn phone_app() -> App {
        App::new(MaskEngine::new(MaskConfig::new("(99) 9", '_')))
    }

    fn type_str(app: &mut App, s: &str) {
        for ch in s.chars() {
            app.handle_action(KeyAction::InsertChar(ch));
        }
    }

    #[test]
    fn test_typing_skips_literals() {
        let mut app = phone_app();
        type_str(&mut app, "5x67");
        assert_eq!(app.engine.text(), "(56) 7");
        assert_eq!(app.engine.selection(), Selection::cursor(6));
    }

    #[test]
    fn test_typing_into_full_field_drops_input() {
        let mut app = phone_app();
        type_str(&mut app, "5678");
        assert_eq!(app.engine.text(), "(56) 7");
        assert_eq!(app.engine.value(true), "567");
    }

    #[test]
    fn test_backspace_removes_user_char() {
        let mut app = phone_app();
        type_str(&mut app, "567");

        app.handle_action(KeyAction::Backspace);

        assert_eq!(app.engine.text(), "(56) _");
        assert_eq!(app.engine.selection(), Selection::cursor(3));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut app = phone_app();
        app.handle_action(KeyAction::Backspace);
        assert_eq!(app.engine.text(), "(__) _");
        assert_eq!(app.engine.selection(), Selection::cursor(0));
    }

    #[test]
    fn test_delete_selection() {
        let mut app = phone_app();
        type_str(&mut app, "567");
        app.engine.set_selection(Selection::new(1, 3));

        app.handle_action(KeyAction::Delete);

        assert_eq!(app.engine.text(), "(7_) _");
        assert_eq!(app.engine.value(true), "7");
    }

    #[test]
    fn test_cursor_movement() {
        let mut app = phone_app();
        app.handle_action(KeyAction::Left);
        assert_eq!(app.engine.selection(), Selection::cursor(0));
        app.handle_action(KeyAction::Right);
        assert_eq!(app.engine.selection(), Selection::cursor(1));
        app.handle_action(KeyAction::End);
        assert_eq!(app.engine.selection(), Selection::cursor(6));
        app.handle_action(KeyAction::Right);
        assert_eq!(app.engine.selection(), Selection::cursor(6));
        app.handle_action(KeyAction::Home);
        assert_eq!(app.engine.selection(), Selection::cursor(0));
    }

    #[test]
    fn test_overtype_replaces_placeholder() {
        let mut app = phone_app();
        app.handle_action(KeyAction::ToggleMode);
        assert_eq!(app.mode, EditMode::Overtype);
        app.engine.set_selection(Selection::cursor(1));

        type_str(&mut app, "5");

        assert_eq!(app.engine.text(), "(5_) _");
        assert_eq!(app.engine.selection(), Selection::cursor(2));
    }

    #[test]
    fn test_run_accepts_on_enter() {
        let mut app = phone_app();
        let mut term = MockTerminal::new(40, 10);
        for code in [KeyCode::Char('1'), KeyCode::Char('2'), KeyCode::Enter] {
            term.push_key(key(code));
        }

        let outcome = app.run(&mut term).unwrap();

        assert_eq!(outcome, FieldOutcome::Accepted);
        assert_eq!(app.engine.value(false), "(12) _");
        assert_eq!(term.ops.first(), Some(&MockOp::Init));
        assert_eq!(term.ops.last(), Some(&MockOp::Cleanup));
        assert!(term.written().contains(&"> (12) _"));
        assert!(term.written().contains(&"[INS] value: 12"));
        // Cursor parked after the prompt and the last digit.
        assert_eq!((term.cursor_col, term.cursor_row), (5, FIELD_ROW));
    }

    #[test]
    fn test_run_cancels_on_escape() {
        let mut app = phone_app();
        let mut term = MockTerminal::new(40, 10);
        term.push_key(key(KeyCode::Char('9')));
        term.push_key(key(KeyCode::Esc));

        assert_eq!(app.run(&mut term).unwrap(), FieldOutcome::Cancelled);
        assert!(!app.running);
    }

    #[test]
    fn test_run_cleans_up_when_keys_run_out() {
        let mut app = phone_app();
        let mut term = MockTerminal::new(40, 10);

        assert!(app.run(&mut term).is_err());
        assert_eq!(term.ops.last(), Some(&MockOp::Cleanup));
    }

    #[test]
    fn test_redraw_clips_to_width() {
        let app = App::new(MaskEngine::new(MaskConfig::new("9999999999", '_')));
        let mut term = MockTerminal::new(6, 10);
        app.redraw(&mut term);
        assert!(term.written().contains(&"> ____"));
    }

    #[test]
    fn test_redraw_skips_rows_below_screen() {
        let app = phone_app();
        let mut term = MockTerminal::new(40, 3);
        app.redraw(&mut term);

        assert_eq!(term.written(), vec!["Mask: (99) 9", "> (__) _"]);
        assert!(!term.ops.contains(&MockOp::MoveCursor(0, STATUS_ROW)));
        assert_eq!(term.cursor_row, FIELD_ROW);
    }
}
