//! Question input buffer and its key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Free-text question being typed. The cursor is a char index.
#[derive(Clone, Debug, Default)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole buffer, leaving the cursor at the end
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    /// Go to start of current line
    pub fn move_home(&mut self) {
        let (_, col) = self.cursor_line_col();
        self.cursor -= col;
    }

    /// Go to end of current line
    pub fn move_end(&mut self) {
        let (line, col) = self.cursor_line_col();
        let len = self.line_len(line);
        self.cursor += len - col;
    }

    pub fn move_up(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line > 0 {
            self.cursor = self.line_start(line - 1) + col.min(self.line_len(line - 1));
        }
    }

    pub fn move_down(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line + 1 < self.line_count() {
            self.cursor = self.line_start(line + 1) + col.min(self.line_len(line + 1));
        }
    }

    /// Number of lines in the buffer, at least one. The input box grows to fit.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Get cursor line and column
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.text.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn line_len(&self, line: usize) -> usize {
        self.text
            .split('\n')
            .nth(line)
            .map(|l| l.chars().count())
            .unwrap_or(0)
    }

    fn line_start(&self, line: usize) -> usize {
        self.text
            .split('\n')
            .take(line)
            .map(|l| l.chars().count() + 1)
            .sum()
    }
}

/// What a key press means for the question input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorCommand {
    Submit,
    Newline,
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Clear,
}

/// Map a key press to an editor command.
///
/// Enter without a modifier submits; Shift+Enter (or Alt+Enter on terminals
/// that cannot report Shift) inserts a newline.
pub fn editor_command(key: KeyEvent) -> Option<EditorCommand> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let command = match key.code {
        KeyCode::Enter if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            EditorCommand::Newline
        }
        KeyCode::Enter => EditorCommand::Submit,
        KeyCode::Char('e') if ctrl => EditorCommand::Submit,
        KeyCode::Char('u') if ctrl => EditorCommand::Clear,
        KeyCode::Char(c) if !ctrl && !alt => EditorCommand::Insert(c),
        KeyCode::Backspace => EditorCommand::Backspace,
        KeyCode::Delete => EditorCommand::Delete,
        KeyCode::Left => EditorCommand::Left,
        KeyCode::Right => EditorCommand::Right,
        KeyCode::Up => EditorCommand::Up,
        KeyCode::Down => EditorCommand::Down,
        KeyCode::Home => EditorCommand::Home,
        KeyCode::End => EditorCommand::End,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_enter_submits_and_modified_enter_breaks_line() {
        assert_eq!(
            editor_command(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(EditorCommand::Submit)
        );
        assert_eq!(
            editor_command(key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Some(EditorCommand::Newline)
        );
        assert_eq!(
            editor_command(key(KeyCode::Enter, KeyModifiers::ALT)),
            Some(EditorCommand::Newline)
        );
        assert_eq!(
            editor_command(key(KeyCode::Char('e'), KeyModifiers::CONTROL)),
            Some(EditorCommand::Submit)
        );
    }

    #[test]
    fn test_shifted_characters_are_typed() {
        assert_eq!(
            editor_command(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(EditorCommand::Insert('A'))
        );
    }

    #[test]
    fn test_line_count_grows_with_newlines() {
        let mut input = InputBuffer::new();
        assert_eq!(input.line_count(), 1);
        input.set_text("top customers");
        input.insert_newline();
        input.insert_char('x');
        assert_eq!(input.line_count(), 2);
        assert_eq!(input.text(), "top customers\nx");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputBuffer::new();
        input.set_text("café");
        input.backspace();
        assert_eq!(input.text(), "caf");
        input.move_home();
        input.insert_char('¿');
        assert_eq!(input.text(), "¿caf");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let mut input = InputBuffer::new();
        input.set_text("long first line\nab");
        input.move_up();
        assert_eq!(input.cursor_line_col(), (0, 2));
        input.move_end();
        assert_eq!(input.cursor_line_col(), (0, 15));
        input.move_down();
        assert_eq!(input.cursor_line_col(), (1, 2));
    }
}
