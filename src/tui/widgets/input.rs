use crossterm::event::{KeyCode, KeyEvent};

/// Minimal single-line text editor for the create forms: a value plus a
/// cursor position in characters.
#[derive(Debug, Default, Clone)]
pub struct Input {
    value: String,
    cursor: usize,
}

impl Input {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    /// Byte offset of the cursor within the value.
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                let index = self.byte_index();
                self.value.insert(index, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let index = self.byte_index();
                    self.value.remove(index);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let index = self.byte_index();
                    self.value.remove(index);
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor < self.value.chars().count() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(input: &mut Input, code: KeyCode) {
        input.handle_key(&KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn types_and_edits_in_the_middle() {
        let mut input = Input::default();
        for c in "almond".chars() {
            press(&mut input, KeyCode::Char(c));
        }
        assert_eq!(input.value(), "almond");

        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Right);
        press(&mut input, KeyCode::Char('x'));
        assert_eq!(input.value(), "axlmond");

        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "almond");
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut input = Input::default();
        press(&mut input, KeyCode::Char('é'));
        press(&mut input, KeyCode::Char('à'));
        assert_eq!(input.value(), "éà");
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "é");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn backspace_on_empty_is_a_no_op() {
        let mut input = Input::default();
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "");
    }
}
