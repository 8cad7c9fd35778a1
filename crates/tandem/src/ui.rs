//! UI rendering for the TUI

use crate::app::App;
use crate::views::{render_combined, render_split};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tandem_core::ViewMode;
use unicode_width::UnicodeWidthStr;

/// Truncate a path to fit a given width, using /.../ for middle sections
pub(crate) fn truncate_path(path: &str, max_width: usize) -> String {
    if path.width() <= max_width {
        return path.to_string();
    }

    let tail = |text: &str, width: usize| -> String {
        let mut out: Vec<char> = Vec::new();
        let mut used = 0;
        for ch in text.chars().rev() {
            let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            out.push(ch);
        }
        out.into_iter().rev().collect()
    };

    let parts: Vec<&str> = path.split('/').collect();
    if parts.len() <= 2 {
        return format!("...{}", tail(path, max_width.saturating_sub(3)));
    }

    // Keep first and last parts, abbreviate middle
    let first = parts[0];
    let last = parts.last().copied().unwrap_or("");

    let simple = format!("{}/.../{}", first, last);
    if simple.width() <= max_width {
        return simple;
    }

    format!(".../{}", tail(last, max_width.saturating_sub(4)))
}

/// Main drawing function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // File header
            Constraint::Min(0),    // Diff body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_body(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    if app.show_help {
        draw_help_popover(frame, app);
    }
}

fn draw_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let display_name = app.current_file_path();
    let Some(file) = app.session.current_file() else {
        frame.render_widget(Paragraph::new(" No files"), area);
        return;
    };

    let counter = if app.session.is_multi_file() {
        format!(" [{}/{}]", app.session.selected_index + 1, app.session.file_count())
    } else {
        String::new()
    };
    let stats = format!(" +{} -{}", file.insertions, file.deletions);
    let reserved = 3 + stats.width() + counter.width();
    let path = truncate_path(&display_name, (area.width as usize).saturating_sub(reserved));

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", file.status.symbol()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(path, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" +{}", file.insertions), Style::default().fg(app.theme.added)),
        Span::styled(format!(" -{}", file.deletions), Style::default().fg(app.theme.deleted)),
        Span::styled(counter, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_body(frame: &mut Frame, app: &mut App, area: Rect) {
    if let Some(message) = app.session.placeholder() {
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        let y = area.y + area.height / 2;
        frame.render_widget(paragraph, Rect::new(area.x, y, area.width, 1.min(area.height)));
        return;
    }

    match app.view_mode() {
        ViewMode::Combined => render_combined(frame, app, area),
        ViewMode::SideBySide => render_split(frame, app, area),
    }
}

fn draw_status_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let mode = match app.view_mode() {
        ViewMode::Combined => " COMBINED ",
        ViewMode::SideBySide if app.old_side => " SPLIT ◀ ",
        ViewMode::SideBySide => " SPLIT ▶ ",
    };

    let indicator = format!(" block {} ", app.indicator());
    let rows = app.row_count();
    let position = if rows == 0 {
        String::new()
    } else {
        format!(" row {}/{} ", app.caret + 1, rows)
    };
    let selecting = if app.selection_anchor.is_some() {
        " VISUAL "
    } else {
        ""
    };

    let message = app
        .status_message
        .clone()
        .unwrap_or_else(|| " ? help".to_string());

    let line = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            selecting,
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Span::styled(indicator, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(position, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(message, Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_help_popover(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let popup_width = 40u16.min(area.width.saturating_sub(4));
    let base_height = if app.session.is_multi_file() { 22 } else { 19 };
    let popup_height = (base_height as u16).min(area.height.saturating_sub(2));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let key_style = Style::default().fg(Color::Cyan);
    let label_style = Style::default();
    let section_style = Style::default().fg(Color::Yellow);

    let help_line = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::styled(format!("  {:<12}", key), key_style),
            Span::styled(desc.to_string(), label_style),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(" Navigation", section_style)),
        help_line("j / k / ↑↓", "Move caret"),
        help_line("^D / ^U", "Half page down/up"),
        help_line("n / p", "Next/prev block"),
        help_line("g / G", "First/last block"),
        help_line("J / K", "Scroll view"),
        Line::from(""),
        Line::from(Span::styled(" Selection", section_style)),
        help_line("v", "Start/stop selection"),
        help_line("y", "Map selection"),
        help_line("Enter", "Map hunk at caret"),
        Line::from(""),
        Line::from(Span::styled(" View", section_style)),
        help_line("Tab", "Combined/split"),
        help_line("h / l", "Old/new column"),
        help_line("r", "Reload patch"),
    ];

    if app.session.is_multi_file() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Files", section_style)));
        lines.push(help_line("[ / ]", "Prev/next file"));
    }

    lines.push(Line::from(""));
    lines.push(help_line("q / Esc", "Quit"));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}
