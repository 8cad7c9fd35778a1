//! Split view with the aligned old and new columns

use super::{clip, line_number, padding_fill, RowMarks};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tandem_core::{DiffLine, LineKind};

/// "▶1234 " or "▶"
fn gutter_width(line_numbers: bool) -> u16 {
    if line_numbers {
        6
    } else {
        1
    }
}

/// Render the split view
pub fn render_split(frame: &mut Frame, app: &mut App, area: Rect) {
    app.set_viewport_height(area.height as usize);
    let scroll = app.scroll;
    let old_focused = app.old_side;
    let marks = RowMarks::from_app(app);

    let Some(ctx) = app.session.current_context() else {
        return;
    };
    let marks = marks.with_block(ctx.navigator().current_block());
    let Some(aligned) = ctx.aligned() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let height = area.height as usize;
    render_pane(frame, &marks, &aligned.old, scroll, height, old_focused, true, chunks[0]);
    render_pane(frame, &marks, &aligned.new, scroll, height, !old_focused, false, chunks[1]);
}

#[allow(clippy::too_many_arguments)]
fn render_pane(
    frame: &mut Frame,
    marks: &RowMarks,
    column: &[DiffLine],
    scroll: usize,
    height: usize,
    focused: bool,
    old_side: bool,
    area: Rect,
) {
    // Split into gutter and content, plus border between the panes
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(gutter_width(marks.line_numbers)),
            Constraint::Min(0),
            Constraint::Length(if old_side { 1 } else { 0 }),
        ])
        .split(area);

    let gutter_area = chunks[0];
    let content_area = chunks[1];
    let border_area = chunks[2];
    let content_width = content_area.width as usize;
    let number_style = Style::default().fg(Color::DarkGray);

    let mut gutter_lines: Vec<Line> = Vec::new();
    let mut content_lines: Vec<Line> = Vec::new();

    for (row, line) in column.iter().enumerate().skip(scroll).take(height) {
        let mut gutter = vec![marks.marker(row, focused)];
        if marks.line_numbers {
            let number = if old_side { line.old_line } else { line.new_line };
            gutter.push(Span::styled(line_number(number), number_style));
            gutter.push(Span::raw(" "));
        }
        gutter_lines.push(Line::from(gutter));

        let text = match line.kind {
            LineKind::Empty => padding_fill(content_width),
            _ => clip(&line.content, content_width),
        };
        content_lines.push(Line::from(Span::styled(
            text,
            marks.content_style(line.kind, row),
        )));
    }

    frame.render_widget(Paragraph::new(gutter_lines), gutter_area);
    frame.render_widget(Paragraph::new(content_lines), content_area);

    if old_side {
        let border = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(border, border_area);
    }
}
