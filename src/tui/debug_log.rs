//! Debug log pane: captured tracing output inside the dashboard.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::log_capture::LogBuffer;

/// Scrollback kept for display.
const SCROLLBACK: usize = 1000;

/// Pane height when visible, borders included.
pub const PANE_HEIGHT: u16 = 10;

pub struct DebugLogState {
    source: LogBuffer,
    lines: Vec<String>,
    pub visible: bool,
    /// 0 = pinned to the newest line.
    scroll_offset: usize,
}

impl DebugLogState {
    pub fn new(source: LogBuffer) -> Self {
        Self {
            source,
            lines: Vec::new(),
            visible: false,
            scroll_offset: 0,
        }
    }

    /// Pull newly captured lines. Called once per loop iteration.
    pub fn refresh(&mut self) {
        self.lines.extend(self.source.take_all());
        if self.lines.len() > SCROLLBACK {
            let excess = self.lines.len() - SCROLLBACK;
            self.lines.drain(..excess);
            self.scroll_offset = self.scroll_offset.saturating_sub(excess);
        }
    }

    /// Show or hide; opening jumps to the newest line.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.scroll_offset = 0;
        }
    }

    /// Scroll toward older lines.
    pub fn scroll_up(&mut self, n: usize) {
        let max_offset = self.lines.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + n).min(max_offset);
    }

    /// Scroll toward newer lines.
    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }
}

pub fn render(area: Rect, buf: &mut Buffer, state: &DebugLogState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Debug Log ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let end = state.lines.len().saturating_sub(state.scroll_offset);
    let start = end.saturating_sub(inner.height as usize);

    let lines: Vec<Line> = state.lines[start..end]
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(level_color(line)),
            ))
        })
        .collect();

    Paragraph::new(lines).render(inner, buf);
}

/// Color by the level token the fmt layer writes.
fn level_color(line: &str) -> Color {
    let level = line
        .split_whitespace()
        .find(|word| matches!(*word, "ERROR" | "WARN" | "INFO" | "DEBUG" | "TRACE"));
    match level {
        Some("ERROR") => Color::Red,
        Some("WARN") => Color::Yellow,
        Some("INFO") => Color::Green,
        Some(_) => Color::DarkGray,
        None => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(count: usize) -> DebugLogState {
        let buffer = LogBuffer::new();
        for i in 0..count {
            buffer.push(format!("line {}", i));
        }
        let mut state = DebugLogState::new(buffer);
        state.refresh();
        state
    }

    #[test]
    fn test_refresh_accumulates() {
        let buffer = LogBuffer::new();
        let mut state = DebugLogState::new(buffer.clone());
        buffer.push("first".to_string());
        state.refresh();
        buffer.push("second".to_string());
        state.refresh();
        assert_eq!(state.lines, vec!["first", "second"]);
    }

    #[test]
    fn test_toggle_resets_scroll() {
        let mut state = filled(20);
        state.scroll_up(5);
        state.toggle();
        assert!(state.visible);
        assert_eq!(state.scroll_offset, 0);
        state.toggle();
        assert!(!state.visible);
    }

    #[test]
    fn test_scroll_clamps() {
        let mut state = filled(5);
        state.scroll_up(100);
        assert_eq!(state.scroll_offset, 4);
        state.scroll_down(2);
        assert_eq!(state.scroll_offset, 2);
        state.scroll_down(10);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_level_color() {
        assert_eq!(level_color("2024-01-15T10:30:00Z ERROR start_call: HTTP 500"), Color::Red);
        assert_eq!(level_color("2024-01-15T10:30:00Z  WARN all_calls returned HTTP 404"), Color::Yellow);
        assert_eq!(level_color("2024-01-15T10:30:00Z  INFO Call CA1 ended"), Color::Green);
        assert_eq!(level_color("plain text"), Color::White);
    }
}
