//! TUI application state and main event loop
//!
//! Each key press maps to at most one dashboard action. The action runs to
//! completion (blocking further input) before the next frame is drawn.

use std::panic::AssertUnwindSafe;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{FutureExt, StreamExt};
use ratatui::DefaultTerminal;

use super::debug_log::DebugLogState;
use super::input::NumberInput;
use super::log_capture::LogBuffer;
use super::ui;
use crate::api::{CallApi, DialerClient};
use crate::config::Config;
use crate::dashboard::{Action, Dashboard};

/// Lines moved per PageUp/PageDown in the debug log.
const LOG_PAGE: usize = 5;

/// Which widget receives plain keys.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    #[default]
    Number,
    History,
}

impl Focus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Focus::Number => "number",
            Focus::History => "history",
        }
    }

    fn toggle(self) -> Self {
        match self {
            Focus::Number => Focus::History,
            Focus::History => Focus::Number,
        }
    }
}

/// Presentation state that lives outside the dashboard controller.
pub struct App {
    pub should_exit: bool,
    pub focus: Focus,
    pub input: NumberInput,
    pub show_help: bool,
    /// Selected row in the history table.
    pub selected_row: usize,
    /// Set while a render pass is waiting on the backend.
    pub busy: bool,
    pub debug_log: DebugLogState,
}

impl App {
    pub fn new(log_buffer: LogBuffer) -> Self {
        Self {
            should_exit: false,
            focus: Focus::default(),
            input: NumberInput::default(),
            show_help: false,
            selected_row: 0,
            busy: false,
            debug_log: DebugLogState::new(log_buffer),
        }
    }

    /// Handle one terminal event, returning the dashboard action it triggers.
    pub fn handle_event(&mut self, event: Event, history_rows: usize) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, history_rows),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, history_rows: usize) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return None;
        }

        if self.show_help {
            self.show_help = false;
            return None;
        }

        if ctrl {
            return match key.code {
                KeyCode::Char('s') => Some(Action::RefreshStatus),
                KeyCode::Char('r') => Some(Action::RefreshHistory),
                KeyCode::Char('d') => {
                    self.debug_log.toggle();
                    None
                }
                KeyCode::Char('u') => {
                    self.input.clear();
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) if self.focus == Focus::Number && NumberInput::accepts(c) => {
                self.input.insert_char(c);
                None
            }
            KeyCode::Char('q') => {
                self.should_exit = true;
                None
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                None
            }
            KeyCode::Char('s') => Some(Action::RefreshStatus),
            KeyCode::Char('r') => Some(Action::RefreshHistory),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                None
            }
            KeyCode::PageUp => {
                self.debug_log.scroll_up(LOG_PAGE);
                None
            }
            KeyCode::PageDown => {
                self.debug_log.scroll_down(LOG_PAGE);
                None
            }
            code if self.focus == Focus::Number => self.handle_input_key(code),
            code => {
                self.handle_history_key(code, history_rows);
                None
            }
        }
    }

    fn handle_input_key(&mut self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Enter => return Some(Action::Dial(self.input.text().to_string())),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
        None
    }

    fn handle_history_key(&mut self, code: KeyCode, history_rows: usize) {
        match code {
            KeyCode::Up => self.selected_row = self.selected_row.saturating_sub(1),
            KeyCode::Down => {
                if self.selected_row + 1 < history_rows {
                    self.selected_row += 1;
                }
            }
            KeyCode::Home => self.selected_row = 0,
            KeyCode::End => self.selected_row = history_rows.saturating_sub(1),
            _ => {}
        }
    }

    /// Keep the selection inside a freshly fetched table.
    pub fn clamp_selection(&mut self, history_rows: usize) {
        self.selected_row = self.selected_row.min(history_rows.saturating_sub(1));
    }
}

/// Run the dashboard with panic-safe terminal restore.
pub async fn run(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let client = DialerClient::new(&config)?;
    let mut dashboard = Dashboard::new(client, config.company.clone(), config.history_limit);
    tracing::info!("Dashboard started against {}", config.base_url);

    let mut app = App::new(log_buffer);
    if let Some(warning) = config.credentials_warning() {
        tracing::warn!("{}", warning);
        // Open the log pane so the warning is seen before the first 401.
        app.debug_log.toggle();
    }

    let mut terminal = ratatui::init();
    let result = AssertUnwindSafe(run_app(&mut terminal, &mut app, &mut dashboard))
        .catch_unwind()
        .await;
    ratatui::restore();

    match result {
        Ok(r) => r,
        Err(e) => std::panic::resume_unwind(e),
    }
}

async fn run_app<A: CallApi>(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    dashboard: &mut Dashboard<A>,
) -> Result<()> {
    let mut events = EventStream::new();

    run_pass(terminal, app, dashboard, Action::Render).await?;

    while !app.should_exit {
        app.debug_log.refresh();
        terminal.draw(|frame| ui::render(frame, &*app, &*dashboard))?;

        let Some(event) = events.next().await else {
            break;
        };
        let rows = dashboard.history().rows().len();
        if let Some(action) = app.handle_event(event?, rows) {
            run_pass(terminal, app, dashboard, action).await?;
        }
    }

    Ok(())
}

/// Draw a busy frame, run the pass, then settle the selection.
async fn run_pass<A: CallApi>(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    dashboard: &mut Dashboard<A>,
    action: Action,
) -> Result<()> {
    app.busy = true;
    terminal.draw(|frame| ui::render(frame, &*app, &*dashboard))?;

    dashboard.run_pass(action).await;

    app.busy = false;
    app.clamp_selection(dashboard.history().rows().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(app.handle_event(press(KeyCode::Char(c)), 0), None);
        }
    }

    #[test]
    fn test_enter_dials_typed_number() {
        let mut app = App::new(LogBuffer::new());
        type_text(&mut app, "+919876543210");
        assert_eq!(
            app.handle_event(press(KeyCode::Enter), 0),
            Some(Action::Dial("+919876543210".to_string()))
        );
        // Number stays for a redial.
        assert_eq!(app.input.text(), "+919876543210");
    }

    #[test]
    fn test_shortcuts_while_typing() {
        let mut app = App::new(LogBuffer::new());
        type_text(&mut app, "+91");
        assert_eq!(
            app.handle_event(press(KeyCode::Char('s')), 0),
            Some(Action::RefreshStatus)
        );
        assert_eq!(app.handle_event(ctrl('r'), 0), Some(Action::RefreshHistory));
        assert_eq!(app.input.text(), "+91");

        app.handle_event(ctrl('u'), 0);
        assert_eq!(app.input.text(), "");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(LogBuffer::new());
        app.handle_event(press(KeyCode::Char('q')), 0);
        assert!(app.should_exit);

        let mut app = App::new(LogBuffer::new());
        app.handle_event(ctrl('c'), 0);
        assert!(app.should_exit);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = App::new(LogBuffer::new());
        app.handle_event(press(KeyCode::Char('?')), 0);
        assert!(app.show_help);
        assert_eq!(app.handle_event(press(KeyCode::Char('r')), 0), None);
        assert!(!app.show_help);
    }

    #[test]
    fn test_history_navigation() {
        let mut app = App::new(LogBuffer::new());
        app.handle_event(press(KeyCode::Tab), 3);
        assert_eq!(app.focus, Focus::History);

        // Digits are not typed into the number field while the table has focus.
        app.handle_event(press(KeyCode::Char('9')), 3);
        assert_eq!(app.input.text(), "");

        for _ in 0..5 {
            app.handle_event(press(KeyCode::Down), 3);
        }
        assert_eq!(app.selected_row, 2);
        app.handle_event(press(KeyCode::Up), 3);
        assert_eq!(app.selected_row, 1);
        assert_eq!(app.handle_event(press(KeyCode::Enter), 3), None);

        app.clamp_selection(1);
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn test_debug_log_toggle() {
        let mut app = App::new(LogBuffer::new());
        app.handle_event(ctrl('d'), 0);
        assert!(app.debug_log.visible);
    }
}
