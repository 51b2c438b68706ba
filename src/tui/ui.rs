//! UI rendering for the TUI

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, Focus};
use super::debug_log;
use super::help;
use super::input;
use crate::api::CallApi;
use crate::dashboard::{CallRow, Dashboard, Notice, NoticeLevel};

const TITLE: &str = "Huru Customer Support";

/// Status panel: border + status line + call id line + border.
const STATUS_HEIGHT: u16 = 4;

/// Notices shown at once; a pass rarely raises more.
const MAX_NOTICE_LINES: usize = 3;

/// Main render function
pub fn render<A: CallApi>(frame: &mut Frame, app: &App, dashboard: &Dashboard<A>) {
    let area = frame.area();

    let notices = dashboard.notices();
    let notice_height = notices.len().min(MAX_NOTICE_LINES) as u16;
    let log_height = if app.debug_log.visible {
        debug_log::PANE_HEIGHT
    } else {
        0
    };

    let [header_area, input_area, status_area, notice_area, history_area, log_area, footer_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(input::INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(notice_height),
            Constraint::Fill(1),
            Constraint::Length(log_height),
            Constraint::Length(1),
        ])
        .areas(area);

    render_header(header_area, frame.buffer_mut(), app);
    input::render(input_area, frame, &app.input, app.focus == Focus::Number);
    render_call_status(status_area, frame.buffer_mut(), dashboard);
    render_notices(notice_area, frame.buffer_mut(), notices);
    render_history(history_area, frame, app, dashboard);

    if app.debug_log.visible {
        debug_log::render(log_area, frame.buffer_mut(), &app.debug_log);
    }

    render_footer(footer_area, frame.buffer_mut(), app);

    if app.show_help {
        help::render_help_popup(frame);
    }
}

fn render_header(area: Rect, buf: &mut Buffer, app: &App) {
    let title = Span::styled(
        TITLE,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let right = if app.busy {
        Span::styled(" working... ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" [?] Help ", Style::default().fg(Color::Gray))
    };

    // Center the title, right-align the indicator.
    let title_width = TITLE.width() as u16;
    let right_width = right.content.width() as u16;
    let left_pad = area.width.saturating_sub(title_width) / 2;
    let right_pad = area
        .width
        .saturating_sub(left_pad + title_width + right_width);

    let line = Line::from(vec![
        Span::raw(" ".repeat(left_pad as usize)),
        title,
        Span::raw(" ".repeat(right_pad as usize)),
        right,
    ]);

    Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .render(area, buf);
}

fn render_call_status<A: CallApi>(area: Rect, buf: &mut Buffer, dashboard: &Dashboard<A>) {
    let session = dashboard.session();

    let border_color = if session.call_in_progress() {
        Color::Green
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            " Call Status ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            " s: Refresh Status ",
            Style::default().fg(Color::Cyan),
        )));

    let label = Style::default().fg(Color::Gray);
    let status_line = match session.call_status() {
        Some(status) => Line::from(vec![
            Span::styled(" Status: ", label),
            Span::styled(
                status.to_string(),
                Style::default()
                    .fg(status_color(status))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled(" No call placed yet", label)),
    };
    let sid_line = match session.call_sid() {
        Some(sid) => Line::from(vec![
            Span::styled(" Call ID: ", label),
            Span::styled(sid.to_string(), Style::default().fg(Color::White)),
        ]),
        None => Line::from(""),
    };

    Paragraph::new(vec![status_line, sid_line])
        .block(block)
        .render(area, buf);
}

fn status_color(status: &str) -> Color {
    match status {
        "completed" => Color::Green,
        "canceled" | "failed" | "busy" | "no-answer" => Color::Red,
        _ => Color::Yellow,
    }
}

fn render_notices(area: Rect, buf: &mut Buffer, notices: &[Notice]) {
    if area.height == 0 {
        return;
    }

    let lines: Vec<Line> = notices
        .iter()
        .take(MAX_NOTICE_LINES)
        .map(|notice| {
            let (marker, color) = match notice.level {
                NoticeLevel::Success => ("+", Color::Green),
                NoticeLevel::Info => ("i", Color::Cyan),
                NoticeLevel::Error => ("!", Color::Red),
            };
            Line::from(Span::styled(
                format!(" {} {}", marker, notice.text),
                Style::default().fg(color),
            ))
        })
        .collect();

    Paragraph::new(lines).render(area, buf);
}

fn render_history<A: CallApi>(area: Rect, frame: &mut Frame, app: &App, dashboard: &Dashboard<A>) {
    let focused = app.focus == Focus::History;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            " Recent Calls ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            " r: Refresh Call History ",
            Style::default().fg(Color::Cyan),
        )));

    let header = Row::new(CallRow::HEADERS.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = dashboard.history().rows().iter().map(|row| {
        let cells = row.cells();
        Row::new([
            Cell::from(cells[0].to_string()),
            Cell::from(cells[1].to_string()),
            Cell::from(cells[2].to_string()),
            Cell::from(cells[3].to_string()),
            Cell::from(cells[4].to_string()).style(Style::default().fg(status_color(cells[4]))),
            Cell::from(cells[5].to_string()),
        ])
    });

    let widths = [
        Constraint::Length(16),
        Constraint::Length(19),
        Constraint::Length(19),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = if focused {
        TableState::default().with_selected(Some(app.selected_row))
    } else {
        TableState::default()
    };
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(area: Rect, buf: &mut Buffer, app: &App) {
    let sep = Span::styled(" | ", Style::default().fg(Color::Gray));
    let hint = Style::default().fg(Color::Gray);

    let line = Line::from(vec![
        Span::styled(
            format!(" Tab: {} ", app.focus.as_str()),
            Style::default().fg(Color::Cyan),
        ),
        sep.clone(),
        Span::styled("Enter: dial", hint),
        sep.clone(),
        Span::styled("s: status", hint),
        sep.clone(),
        Span::styled("r: history", hint),
        sep.clone(),
        Span::styled("C-d: log", hint),
        sep,
        Span::styled("q: quit", hint),
    ]);

    Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .render(area, buf);
}
