/// Single-line text input used by the create forms.
///
/// Every form field here is one line (title, date, time, category,
/// description), so this editor tracks a character-indexed cursor in a
/// single string. Cursor positions are character offsets, not bytes.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    content: String,
    cursor: usize,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_string(content: String) -> Self {
        let cursor = content.chars().count();
        Self { content, cursor }
    }

    pub fn insert_char(&mut self, ch: char) {
        let byte_index = self.byte_index(self.cursor);
        self.content.insert(byte_index, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let byte_index = self.byte_index(self.cursor - 1);
        self.content.remove(byte_index);
        self.cursor -= 1;
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_delete_at_cursor() {
        let mut editor = Editor::new();
        editor.insert_char('a');
        editor.insert_char('c');
        editor.move_cursor_left();
        editor.insert_char('b');
        assert_eq!(editor.as_str(), "abc");
        editor.move_cursor_end();
        editor.delete_char();
        assert_eq!(editor.as_str(), "ab");
    }

    #[test]
    fn cursor_is_char_indexed_not_byte_indexed() {
        let mut editor = Editor::from_string("café".to_string());
        assert_eq!(editor.cursor(), 4);
        editor.delete_char();
        assert_eq!(editor.as_str(), "caf");
        editor.insert_char('é');
        assert_eq!(editor.as_str(), "café");
    }

    #[test]
    fn cursor_movement_is_clamped() {
        let mut editor = Editor::from_string("ab".to_string());
        editor.move_cursor_right();
        assert_eq!(editor.cursor(), 2);
        editor.move_cursor_home();
        editor.move_cursor_left();
        assert_eq!(editor.cursor(), 0);
    }
}
