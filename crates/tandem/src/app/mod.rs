//! Application state and logic

use crate::config::{Config, ResolvedTheme};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tandem_core::{DiffContext, DiffSession, Direction, DisplayRange, ScrollOffset, ViewMode};

/// Where the patch text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchSource {
    File(PathBuf),
    Stdin,
}

impl PatchSource {
    /// `-` and no argument both mean stdin
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if path.as_os_str() != "-" => PatchSource::File(path),
            _ => PatchSource::Stdin,
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            PatchSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read patch: {}", path.display())),
            PatchSource::Stdin => {
                std::io::read_to_string(std::io::stdin()).context("Failed to read patch from stdin")
            }
        }
    }
}

/// The main application state
pub struct App {
    /// Parsed patch and per-file view state
    pub session: DiffSession,
    pub source: PatchSource,
    /// Caret row (0-based) in the current layout
    pub caret: usize,
    /// First visible row
    pub scroll: usize,
    /// Rows available to the diff body (set during render)
    pub viewport_height: usize,
    /// Column the caret is on in split mode
    pub old_side: bool,
    /// Row where a selection started
    pub selection_anchor: Option<usize>,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    pub line_numbers: bool,
    /// Rows kept between the caret and the viewport edge
    pub scroll_padding: usize,
    pub caret_marker: String,
    pub extent_marker: String,
    pub theme: ResolvedTheme,
    pub show_help: bool,
    /// Vim-style count typed before a motion
    pub pending_count: Option<usize>,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: DiffSession, source: PatchSource, config: &Config) -> Self {
        let mut app = Self {
            session,
            source,
            caret: 0,
            scroll: 0,
            viewport_height: 20,
            old_side: false,
            selection_anchor: None,
            status_message: None,
            line_numbers: config.ui.line_numbers,
            scroll_padding: config.ui.scroll_padding,
            caret_marker: config.ui.caret_marker.clone(),
            extent_marker: config.ui.extent_marker.clone(),
            theme: config.theme.resolve(),
            show_help: false,
            pending_count: None,
            should_quit: false,
        };
        app.restore_file_position();
        app
    }

    pub fn view_mode(&self) -> ViewMode {
        self.session.view_mode()
    }

    pub fn context(&mut self) -> Option<&mut DiffContext> {
        self.session.current_context()
    }

    pub fn row_count(&mut self) -> usize {
        self.context().map_or(0, |ctx| ctx.row_count())
    }

    pub fn indicator(&mut self) -> String {
        self.context()
            .map(|ctx| ctx.navigator().indicator())
            .unwrap_or_else(|| "-/-".to_string())
    }

    /// Inclusive selected rows, if a selection is active
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection_anchor
            .map(|anchor| (anchor.min(self.caret), anchor.max(self.caret)))
    }

    // ==================== Counts ====================

    pub fn push_count_digit(&mut self, digit: u8) {
        let count = self.pending_count.unwrap_or(0);
        self.pending_count = Some(count.saturating_mul(10).saturating_add(digit as usize));
    }

    /// Pending count, or 1
    pub fn take_count(&mut self) -> usize {
        self.pending_count.take().unwrap_or(1).max(1)
    }

    pub fn reset_count(&mut self) {
        self.pending_count = None;
    }

    // ==================== Caret ====================

    pub fn caret_down(&mut self, count: usize) {
        let last = self.row_count().saturating_sub(1);
        self.move_caret((self.caret + count).min(last));
    }

    pub fn caret_up(&mut self, count: usize) {
        self.move_caret(self.caret.saturating_sub(count));
    }

    pub fn half_page_down(&mut self) {
        self.caret_down((self.viewport_height / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.caret_up((self.viewport_height / 2).max(1));
    }

    fn move_caret(&mut self, row: usize) {
        self.caret = row;
        if let Some(ctx) = self.session.current_context() {
            // Blocks are 1-based
            ctx.navigator_mut().update_by_caret_position(row + 1);
        }
        self.ensure_caret_visible();
    }

    // ==================== Blocks ====================

    pub fn goto_block(&mut self, direction: Direction) {
        let block = self
            .session
            .current_context()
            .and_then(|ctx| ctx.navigator_mut().goto(direction));

        match block {
            Some(block) => {
                self.caret = block.start - 1;
                self.scroll_block_into_view(block.start - 1, block.end - 1);
            }
            None => self.status_message = Some("No changes".to_string()),
        }
    }

    fn scroll_block_into_view(&mut self, start: usize, end: usize) {
        let height = self.viewport_height.max(1);
        let fits = end + 1 - start <= height;
        if start < self.scroll || end >= self.scroll + height {
            self.scroll = if fits {
                start.saturating_sub(self.scroll_padding.min(height.saturating_sub(end + 1 - start)))
            } else {
                start
            };
        }
        self.clamp_scroll();
        self.store_scroll();
    }

    // ==================== Scrolling ====================

    /// Scroll the viewport without moving the caret; the block cursor
    /// follows what is on screen
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta);
        self.clamp_scroll();
        self.store_scroll();

        let (start, end) = self.visible_rows();
        if let Some(ctx) = self.session.current_context() {
            ctx.navigator_mut().update_by_visible_range(start + 1, end + 1);
        }
    }

    pub fn ensure_caret_visible(&mut self) {
        let height = self.viewport_height.max(1);
        let padding = self.scroll_padding.min(height.saturating_sub(1) / 2);
        if self.caret < self.scroll + padding {
            self.scroll = self.caret.saturating_sub(padding);
        } else if self.caret + padding >= self.scroll + height {
            self.scroll = self.caret + padding + 1 - height;
        }
        self.clamp_scroll();
        self.store_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max = self.row_count().saturating_sub(self.viewport_height.max(1));
        self.scroll = self.scroll.min(max);
    }

    /// Visible rows, 0-based inclusive
    pub fn visible_rows(&mut self) -> (usize, usize) {
        let rows = self.row_count();
        let end = (self.scroll + self.viewport_height.max(1)).min(rows.max(1)) - 1;
        (self.scroll, end)
    }

    /// Called by the renderer once the body height is known
    pub fn set_viewport_height(&mut self, height: usize) {
        if self.viewport_height != height {
            self.viewport_height = height;
            self.ensure_caret_visible();
        }
        let (start, end) = self.visible_rows();
        if let Some(ctx) = self.session.current_context() {
            ctx.set_display_range(Some(DisplayRange { start, end }));
        }
    }

    fn store_scroll(&mut self) {
        let y = self.scroll as f64;
        if let Some(ctx) = self.session.current_context() {
            let x = ctx.scroll_offset().x;
            ctx.set_scroll_offset(ScrollOffset::new(x, y));
        }
    }

    /// Put scroll and caret back where this file was left
    fn restore_file_position(&mut self) {
        let scroll = self
            .session
            .current_context()
            .map_or(0.0, |ctx| ctx.scroll_offset().y);
        self.scroll = scroll.max(0.0) as usize;
        self.clamp_scroll();

        let caret = self
            .session
            .current_context()
            .and_then(|ctx| ctx.navigator().current_block())
            .map(|block| block.start - 1);
        self.caret = caret.unwrap_or(self.scroll);
        self.selection_anchor = None;
    }

    // ==================== Layout ====================

    /// Switch between combined and split, keeping the caret on the same line
    pub fn toggle_view_mode(&mut self) {
        let origin = self.caret_origin();
        self.session.toggle_view_mode();
        self.selection_anchor = None;

        if let Some(origin) = origin {
            if let Some(row) = self.row_for_origin(origin) {
                self.caret = row;
            }
        }
        self.caret = self.caret.min(self.row_count().saturating_sub(1));
        self.ensure_caret_visible();
    }

    pub fn set_side(&mut self, old_side: bool) {
        if self.view_mode() == ViewMode::SideBySide {
            self.old_side = old_side;
        }
    }

    /// Index in the combined lines of the line under the caret
    fn caret_origin(&mut self) -> Option<usize> {
        let caret = self.caret;
        let old_side = self.old_side;
        let ctx = self.session.current_context()?;
        match ctx.aligned() {
            Some(aligned) => {
                let preferred = aligned.column(old_side).get(caret)?;
                let other = aligned.column(!old_side).get(caret)?;
                preferred.origin.or(other.origin)
            }
            None => Some(caret),
        }
    }

    fn row_for_origin(&mut self, origin: usize) -> Option<usize> {
        let ctx = self.session.current_context()?;
        match ctx.aligned() {
            Some(aligned) => aligned
                .old
                .iter()
                .zip(&aligned.new)
                .position(|(old, new)| old.origin == Some(origin) || new.origin == Some(origin)),
            None => Some(origin),
        }
    }

    // ==================== Selection ====================

    pub fn toggle_selection(&mut self) {
        self.selection_anchor = match self.selection_anchor {
            Some(_) => None,
            None => Some(self.caret),
        };
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selection_anchor.take().is_some()
    }

    /// Map the selection (or the caret row) onto the combined lines
    pub fn map_selection(&mut self) {
        let (start, end) = self.selection().unwrap_or((self.caret, self.caret));
        let old_side = self.old_side;
        let Some(ctx) = self.session.current_context() else {
            return;
        };

        let mapped = if ctx.is_side_by_side() {
            ctx.combined_range_for_single_side(start, end, old_side)
        } else {
            Some((start, end.min(ctx.row_count().saturating_sub(1))))
        };

        self.status_message = Some(match mapped {
            Some((from, to)) => describe_range(ctx, from, to),
            None => "Selection holds no lines".to_string(),
        });
        self.selection_anchor = None;
    }

    /// Select the hunk under the caret
    pub fn map_hunk(&mut self) {
        let caret = self.caret;
        let old_side = self.old_side;
        let Some(ctx) = self.session.current_context() else {
            return;
        };

        let mapped = if ctx.is_side_by_side() {
            ctx.combined_range_for_both_sides(caret, caret, old_side)
        } else {
            ctx.hunk_range_at(caret)
        };

        self.status_message = Some(match mapped {
            Some((from, to)) => format!("Hunk: {}", describe_range(ctx, from, to)),
            None => "No change under caret".to_string(),
        });
    }

    // ==================== Files ====================

    pub fn next_file(&mut self) {
        if self.session.next_file() {
            self.restore_file_position();
        }
    }

    pub fn prev_file(&mut self) {
        if self.session.prev_file() {
            self.restore_file_position();
        }
    }

    pub fn select_file(&mut self, index: usize) {
        self.session.select(index);
        self.restore_file_position();
    }

    /// Re-read the patch; files keep their block and scroll position
    pub fn refresh(&mut self) -> Result<()> {
        if self.source == PatchSource::Stdin {
            self.status_message = Some("Cannot refresh a patch read from stdin".to_string());
            return Ok(());
        }

        let text = self.source.read()?;
        self.session.refresh(&text).context("Failed to parse patch")?;
        self.restore_file_position();
        self.status_message = Some("Refreshed".to_string());
        Ok(())
    }

    pub fn current_file_path(&self) -> String {
        self.session
            .current_file()
            .map(|f| f.display_name.clone())
            .unwrap_or_default()
    }
}

/// "lines 4-6 (old 3-4, new 3-5)" for a combined range
fn describe_range(ctx: &DiffContext, from: usize, to: usize) -> String {
    let lines = &ctx.data().lines[from..=to];
    let span = |numbers: Vec<u32>| match (numbers.first(), numbers.last()) {
        (Some(first), Some(last)) if first == last => format!("{}", first),
        (Some(first), Some(last)) => format!("{}-{}", first, last),
        _ => "-".to_string(),
    };
    let old = span(lines.iter().filter_map(|l| l.old_line).collect());
    let new = span(lines.iter().filter_map(|l| l.new_line).collect());
    format!("lines {}-{} (old {}, new {})", from + 1, to + 1, old, new)
}
