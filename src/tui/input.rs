//! Receiver number input: single-line text field with cursor.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Example number shown while the field is empty.
pub const PLACEHOLDER: &str = "+919876543210";

/// Height of the input box: border + input line + border.
pub const INPUT_HEIGHT: u16 = 3;

const TITLE: &str = " Receiver Number (including country code) ";

/// State for the receiver number field.
#[derive(Default)]
pub struct NumberInput {
    /// Current input text.
    input: String,
    /// Cursor position (character offset into `input`).
    cursor_pos: usize,
}

impl NumberInput {
    pub fn text(&self) -> &str {
        &self.input
    }

    /// Characters that can appear in a dialable number.
    pub fn accepts(c: char) -> bool {
        c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')')
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        let byte_pos = self.char_to_byte(self.cursor_pos);
        self.input.insert(byte_pos, c);
        self.cursor_pos += 1;
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            let byte_pos = self.char_to_byte(self.cursor_pos);
            let prev_byte_pos = self.char_to_byte(self.cursor_pos - 1);
            self.input.drain(prev_byte_pos..byte_pos);
            self.cursor_pos -= 1;
        }
    }

    /// Delete the character at the cursor (delete key).
    pub fn delete(&mut self) {
        if self.cursor_pos < self.char_count() {
            let byte_pos = self.char_to_byte(self.cursor_pos);
            let next_byte_pos = self.char_to_byte(self.cursor_pos + 1);
            self.input.drain(byte_pos..next_byte_pos);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.char_count() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.char_count();
    }

    /// Clear all input text (Ctrl+U).
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Convert a char-based cursor position to a byte offset.
    fn char_to_byte(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    /// Visible slice and cursor column for a field `width` columns wide.
    fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let start = (self.cursor_pos + 1).saturating_sub(width);
        let visible: String = self.input.chars().skip(start).take(width).collect();
        (visible, self.cursor_pos - start)
    }
}

/// Render the input box; places the terminal cursor when focused.
pub fn render(area: Rect, frame: &mut Frame, state: &NumberInput, focused: bool) {
    let (border_style, border_type) = if focused {
        (Style::default().fg(Color::Yellow), BorderType::Double)
    } else {
        (Style::default().fg(Color::DarkGray), BorderType::Plain)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .title(Span::styled(
            TITLE,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            " Enter: Dial Call ",
            Style::default().fg(Color::Green),
        )));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    // One column of left padding.
    let field_width = inner.width.saturating_sub(1) as usize;
    let line = if state.input.is_empty() {
        Line::from(Span::styled(
            format!(" {}", PLACEHOLDER),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let (visible, _) = state.visible(field_width);
        Line::from(Span::styled(
            format!(" {}", visible),
            Style::default().fg(Color::White),
        ))
    };
    let input_area = Rect::new(inner.x, inner.y, inner.width, 1);
    frame.render_widget(Paragraph::new(line), input_area);

    if focused {
        let (_, cursor) = state.visible(field_width);
        frame.set_cursor_position((input_area.x + 1 + cursor as u16, input_area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> NumberInput {
        let mut input = NumberInput::default();
        for c in text.chars() {
            input.insert_char(c);
        }
        input
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = typed("+9198");
        assert_eq!(input.text(), "+9198");
        input.backspace();
        assert_eq!(input.text(), "+919");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = typed("+9176");
        input.move_left();
        input.move_left();
        input.insert_char('8');
        assert_eq!(input.text(), "+91876");
    }

    #[test]
    fn test_delete_and_home_end() {
        let mut input = typed("12345");
        input.move_home();
        input.delete();
        assert_eq!(input.text(), "2345");
        input.move_end();
        input.delete();
        assert_eq!(input.text(), "2345");
        input.move_right();
        input.backspace();
        assert_eq!(input.text(), "234");
    }

    #[test]
    fn test_clear() {
        let mut input = typed("+919876543210");
        input.clear();
        assert_eq!(input.text(), "");
        input.backspace();
        input.move_left();
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_accepts() {
        assert!(NumberInput::accepts('+'));
        assert!(NumberInput::accepts('7'));
        assert!(!NumberInput::accepts('q'));
        assert!(!NumberInput::accepts('?'));
    }

    #[test]
    fn test_visible_scrolls_with_cursor() {
        let input = typed("0123456789");
        let (visible, cursor) = input.visible(5);
        assert_eq!(visible, "6789");
        assert_eq!(cursor, 4);

        let (visible, cursor) = input.visible(20);
        assert_eq!(visible, "0123456789");
        assert_eq!(cursor, 10);
    }
}
