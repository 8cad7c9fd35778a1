//! Combined view: one column with both line numbers

use super::{clip, line_number, RowMarks};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tandem_core::LineKind;

/// "▶ 12   12 " or "▶"
fn gutter_width(line_numbers: bool) -> u16 {
    if line_numbers {
        11
    } else {
        1
    }
}

fn sign(kind: LineKind) -> char {
    match kind {
        LineKind::Added => '+',
        LineKind::Deleted => '-',
        _ => ' ',
    }
}

/// Render the combined view
pub fn render_combined(frame: &mut Frame, app: &mut App, area: Rect) {
    app.set_viewport_height(area.height as usize);
    let scroll = app.scroll;
    let marks = RowMarks::from_app(app);

    let Some(ctx) = app.session.current_context() else {
        return;
    };
    let marks = marks.with_block(ctx.navigator().current_block());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(gutter_width(marks.line_numbers)),
            Constraint::Min(0),
        ])
        .split(area);
    let gutter_area = chunks[0];
    let content_area = chunks[1];
    let content_width = content_area.width as usize;
    let number_style = Style::default().fg(Color::DarkGray);

    let mut gutter_lines: Vec<Line> = Vec::new();
    let mut content_lines: Vec<Line> = Vec::new();

    for (row, line) in ctx
        .data()
        .lines
        .iter()
        .enumerate()
        .skip(scroll)
        .take(area.height as usize)
    {
        let mut gutter = vec![marks.marker(row, true)];
        if marks.line_numbers && line.kind != LineKind::Header {
            gutter.push(Span::styled(line_number(line.old_line), number_style));
            gutter.push(Span::raw(" "));
            gutter.push(Span::styled(line_number(line.new_line), number_style));
            gutter.push(Span::raw(" "));
        }
        gutter_lines.push(Line::from(gutter));

        let text = if line.kind == LineKind::Header {
            clip(&line.content, content_width)
        } else {
            let mut text = String::from(sign(line.kind));
            text.push_str(&clip(&line.content, content_width.saturating_sub(1)));
            text
        };
        content_lines.push(Line::from(Span::styled(
            text,
            marks.content_style(line.kind, row),
        )));
    }

    frame.render_widget(Paragraph::new(gutter_lines), gutter_area);
    frame.render_widget(Paragraph::new(content_lines), content_area);
}
