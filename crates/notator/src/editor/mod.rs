//! Editable text capability backing each tab.
//!
//! The session code only talks to [`EditableText`]: it hands keys over,
//! reads and replaces the whole text, and learns from the returned
//! [`EditOutcome`] whether the content changed. Cursor bookkeeping stays in
//! here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

const PAGE_ROWS: usize = 10;
const TAB_TEXT: &str = "    ";

/// Limits the session places on editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditRestrictions {
    /// Hemingway mode: no deletion and no backward cursor movement.
    pub forward_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Changed,
    Moved,
    /// The key is an edit the restrictions forbid.
    Blocked,
    Ignored,
}

pub trait EditableText {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
    fn handle_key(&mut self, key: KeyEvent, restrictions: EditRestrictions) -> EditOutcome;
    fn insert_str(&mut self, text: &str) -> EditOutcome;
    /// Cursor as (row, display column).
    fn cursor(&self) -> (usize, usize);
}

#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        let mut buffer = Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        };
        buffer.set_text(text);
        buffer
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn clamp_col(&mut self) {
        self.col = self.col.min(self.line_len(self.row));
    }

    fn insert_char(&mut self, ch: char) {
        let idx = byte_index(&self.lines[self.row], self.col);
        self.lines[self.row].insert(idx, ch);
        self.col += 1;
    }

    fn insert_newline(&mut self) {
        let idx = byte_index(&self.lines[self.row], self.col);
        let rest = self.lines[self.row].split_off(idx);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    fn backspace(&mut self) -> bool {
        if self.col > 0 {
            let idx = byte_index(&self.lines[self.row], self.col - 1);
            self.lines[self.row].remove(idx);
            self.col -= 1;
            return true;
        }
        if self.row == 0 {
            return false;
        }
        let line = self.lines.remove(self.row);
        self.row -= 1;
        self.col = self.line_len(self.row);
        self.lines[self.row].push_str(&line);
        true
    }

    fn delete(&mut self) -> bool {
        if self.col < self.line_len(self.row) {
            let idx = byte_index(&self.lines[self.row], self.col);
            self.lines[self.row].remove(idx);
            return true;
        }
        if self.row + 1 >= self.lines.len() {
            return false;
        }
        let next = self.lines.remove(self.row + 1);
        self.lines[self.row].push_str(&next);
        true
    }

    fn move_left(&mut self) -> bool {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        } else {
            return false;
        }
        true
    }

    fn move_right(&mut self) -> bool {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        } else {
            return false;
        }
        true
    }

    fn move_rows(&mut self, delta: isize) -> bool {
        let last = self.lines.len() as isize - 1;
        let target = (self.row as isize + delta).clamp(0, last) as usize;
        if target == self.row {
            return false;
        }
        self.row = target;
        self.clamp_col();
        true
    }
}

impl EditableText for TextBuffer {
    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.row = 0;
        self.col = 0;
    }

    fn handle_key(&mut self, key: KeyEvent, restrictions: EditRestrictions) -> EditOutcome {
        let ctrl_or_alt = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        if restrictions.forward_only && is_backward_key(key.code) {
            return EditOutcome::Blocked;
        }
        let moved = |ok: bool| if ok { EditOutcome::Moved } else { EditOutcome::Ignored };
        match key.code {
            KeyCode::Char(ch) if !ctrl_or_alt => {
                self.insert_char(ch);
                EditOutcome::Changed
            }
            KeyCode::Enter if !ctrl_or_alt => {
                self.insert_newline();
                EditOutcome::Changed
            }
            KeyCode::Tab if !ctrl_or_alt => self.insert_str(TAB_TEXT),
            KeyCode::Backspace if self.backspace() => EditOutcome::Changed,
            KeyCode::Delete if !ctrl_or_alt && self.delete() => EditOutcome::Changed,
            KeyCode::Left => moved(self.move_left()),
            KeyCode::Right => moved(self.move_right()),
            KeyCode::Up => moved(self.move_rows(-1)),
            KeyCode::Down => moved(self.move_rows(1)),
            KeyCode::PageUp if !ctrl_or_alt => moved(self.move_rows(-(PAGE_ROWS as isize))),
            KeyCode::PageDown if !ctrl_or_alt => moved(self.move_rows(PAGE_ROWS as isize)),
            KeyCode::Home => {
                let changed = self.col != 0;
                self.col = 0;
                moved(changed)
            }
            KeyCode::End => {
                let end = self.line_len(self.row);
                let changed = self.col != end;
                self.col = end;
                moved(changed)
            }
            _ => EditOutcome::Ignored,
        }
    }

    fn insert_str(&mut self, text: &str) -> EditOutcome {
        if text.is_empty() {
            return EditOutcome::Ignored;
        }
        for ch in text.chars() {
            match ch {
                '\n' => self.insert_newline(),
                '\r' => {}
                ch => self.insert_char(ch),
            }
        }
        EditOutcome::Changed
    }

    fn cursor(&self) -> (usize, usize) {
        let line = &self.lines[self.row];
        let prefix = &line[..byte_index(line, self.col)];
        (self.row, prefix.width())
    }
}

fn is_backward_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Up
            | KeyCode::Home
            | KeyCode::PageUp
    )
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}
