//! Help popup overlay: keyboard shortcuts by category.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const POPUP_WIDTH: u16 = 64;
const POPUP_HEIGHT: u16 = 16;

struct Shortcut {
    key: &'static str,
    desc: &'static str,
}

struct Category {
    title: &'static str,
    shortcuts: &'static [Shortcut],
}

const CALLS: Category = Category {
    title: "CALLS",
    shortcuts: &[
        Shortcut {
            key: "Enter",
            desc: "Dial the entered number",
        },
        Shortcut {
            key: "s / Ctrl+S",
            desc: "Refresh call status",
        },
        Shortcut {
            key: "r / Ctrl+R",
            desc: "Refresh call history",
        },
        Shortcut {
            key: "Ctrl+U",
            desc: "Clear number",
        },
    ],
};

const NAVIGATION: Category = Category {
    title: "NAVIGATION",
    shortcuts: &[
        Shortcut {
            key: "Tab",
            desc: "Number / history focus",
        },
        Shortcut {
            key: "Up/Down",
            desc: "Move in history",
        },
        Shortcut {
            key: "PgUp/PgDn",
            desc: "Scroll debug log",
        },
    ],
};

const MISC: Category = Category {
    title: "MISC",
    shortcuts: &[
        Shortcut {
            key: "Ctrl+D",
            desc: "Toggle debug log",
        },
        Shortcut {
            key: "?",
            desc: "Toggle this help",
        },
        Shortcut {
            key: "q / Ctrl+C",
            desc: "Quit",
        },
    ],
};

/// Render the help popup centered on screen.
pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let popup_w = POPUP_WIDTH.min(area.width.saturating_sub(2));
    let popup_h = POPUP_HEIGHT.min(area.height.saturating_sub(2));
    let popup_area = centered_rect(popup_w, popup_h, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(
                " HELP ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("(? to close) ", Style::default().fg(Color::Gray)),
        ]))
        .title_bottom(Line::from(Span::styled(
            " Press any key to close ",
            Style::default().fg(Color::Gray),
        )));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let [left_col, right_col] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(inner);

    frame.render_widget(
        Paragraph::new(build_column_lines(&[&CALLS])),
        inset(left_col, 1, 1),
    );
    frame.render_widget(
        Paragraph::new(build_column_lines(&[&NAVIGATION, &MISC])),
        inset(right_col, 1, 1),
    );
}

fn build_column_lines<'a>(categories: &[&Category]) -> Vec<Line<'a>> {
    let mut lines: Vec<Line<'a>> = Vec::new();

    for (cat_idx, cat) in categories.iter().enumerate() {
        if cat_idx > 0 {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            cat.title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "\u{2500}".repeat(28),
            Style::default().fg(Color::DarkGray),
        )));

        for sc in cat.shortcuts.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<12}", sc.key), Style::default().fg(Color::Yellow)),
                Span::styled(sc.desc, Style::default().fg(Color::Gray)),
            ]));
        }
    }

    lines
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn inset(area: Rect, h: u16, v: u16) -> Rect {
    Rect::new(
        area.x + h,
        area.y + v,
        area.width.saturating_sub(h * 2),
        area.height.saturating_sub(v * 2),
    )
}
