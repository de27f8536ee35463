//! Single-line text input for the terminal user interface.

/// A text input with a cursor counted in characters, so accented names
/// ("attività", "Nicolò") edit correctly.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    pub value: String,
    cursor: usize,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input pre-filled with `value`, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    /// Delete the character under the cursor.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Empty the field and return what it held.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_multibyte_text() {
        let mut f = InputField::with_value("attivit");
        f.handle_char('à');
        assert_eq!(f.value, "attività");
        f.move_cursor_left();
        f.handle_char('x');
        assert_eq!(f.value, "attivitxà");
        f.handle_backspace();
        f.handle_delete();
        assert_eq!(f.value, "attivit");
        assert_eq!(f.cursor(), 7);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut f = InputField::new();
        f.move_cursor_left();
        f.handle_backspace();
        f.handle_delete();
        assert_eq!(f.cursor(), 0);
        f.handle_char('a');
        f.move_cursor_right();
        assert_eq!(f.cursor(), 1);
        assert_eq!(f.take(), "a");
        assert_eq!(f.cursor(), 0);
        assert!(f.value.is_empty());
    }
}
