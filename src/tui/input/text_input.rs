//! Single-line text input state.

/// State for a text input field.
///
/// The cursor counts characters, not bytes, so multi-byte input never
/// splits a code point.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    content: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input pre-filled with `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let mut input = Self::new();
        input.set(text);
        input
    }

    /// Replaces the content and moves the cursor to the end.
    pub fn set(&mut self, text: &str) {
        self.content = text.to_string();
        self.cursor = self.content.chars().count();
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Display width of the text before the cursor, for placing the terminal cursor.
    pub fn cursor_width(&self) -> u16 {
        let prefix = &self.content[..self.byte_index(self.cursor)];
        unicode_width::UnicodeWidthStr::width(prefix) as u16
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }
}
