//! View rendering modules

mod combined;
mod split;

pub use combined::render_combined;
pub use split::render_split;

use crate::app::App;
use crate::config::ResolvedTheme;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};
use tandem_core::{Block as ChangeBlock, LineKind};
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 4;

/// Caret, current block and selection, copied out of the app before the
/// diff context is borrowed
pub(crate) struct RowMarks {
    caret_marker: String,
    extent_marker: String,
    caret: usize,
    block: Option<ChangeBlock>,
    selection: Option<(usize, usize)>,
    pub(crate) theme: ResolvedTheme,
    pub(crate) line_numbers: bool,
}

impl RowMarks {
    pub(crate) fn from_app(app: &App) -> Self {
        Self {
            caret_marker: app.caret_marker.clone(),
            extent_marker: app.extent_marker.clone(),
            caret: app.caret,
            block: None,
            selection: app.selection(),
            theme: app.theme,
            line_numbers: app.line_numbers,
        }
    }

    pub(crate) fn with_block(mut self, block: Option<ChangeBlock>) -> Self {
        self.block = block;
        self
    }

    /// Gutter marker for a 0-based row; the caret shows only on the
    /// focused pane
    pub(crate) fn marker(&self, row: usize, focused: bool) -> Span<'static> {
        if focused && row == self.caret {
            Span::styled(
                self.caret_marker.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else if self.block.is_some_and(|b| b.contains(row + 1)) {
            Span::styled(self.extent_marker.clone(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(" ")
        }
    }

    pub(crate) fn is_selected(&self, row: usize) -> bool {
        self.selection
            .is_some_and(|(start, end)| (start..=end).contains(&row))
    }

    pub(crate) fn content_style(&self, kind: LineKind, row: usize) -> Style {
        let style = line_style(kind, &self.theme);
        if self.is_selected(row) {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }
}

pub(crate) fn line_style(kind: LineKind, theme: &ResolvedTheme) -> Style {
    match kind {
        LineKind::Context => Style::default(),
        LineKind::Added => Style::default().fg(theme.added),
        LineKind::Deleted => Style::default().fg(theme.deleted),
        LineKind::Header => Style::default().fg(theme.header).add_modifier(Modifier::BOLD),
        LineKind::Empty => Style::default().fg(theme.padding),
    }
}

pub(crate) fn line_number(number: Option<u32>) -> String {
    match number {
        Some(n) => format!("{:4}", n),
        None => "    ".to_string(),
    }
}

/// Expand tabs and cut to `width` display columns
pub(crate) fn clip(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        if ch == '\t' {
            let spaces = TAB_WIDTH - used % TAB_WIDTH;
            if used + spaces > width {
                break;
            }
            out.extend(std::iter::repeat(' ').take(spaces));
            used += spaces;
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}

/// Hatched filler for padding rows
pub(crate) fn padding_fill(width: usize) -> String {
    "╱".repeat(width)
}

#[cfg(test)]
mod tests;
