//! Question input keyboard handlers

use crate::app::{editor_command, App, EditorCommand};
use crossterm::event::KeyEvent;

impl App {
    /// Question input handler
    pub(crate) fn handle_query_editor(&mut self, key: KeyEvent) {
        let Some(command) = editor_command(key) else {
            return;
        };

        let input = &mut self.console.input;
        match command {
            EditorCommand::Submit => self.submit(),
            EditorCommand::Newline => input.insert_newline(),
            EditorCommand::Insert(c) => input.insert_char(c),
            EditorCommand::Backspace => input.backspace(),
            EditorCommand::Delete => input.delete(),
            EditorCommand::Left => input.move_left(),
            EditorCommand::Right => input.move_right(),
            EditorCommand::Up => input.move_up(),
            EditorCommand::Down => input.move_down(),
            EditorCommand::Home => input.move_home(),
            EditorCommand::End => input.move_end(),
            EditorCommand::Clear => input.clear(),
        }
    }
}
