//! Per-file diff view model
//!
//! A [`DiffContext`] owns everything a diff view needs for one file: the
//! combined lines, the aligned columns when shown side by side, the block
//! navigator and the scroll offset. Contexts are never patched in place when
//! the diff changes; a new one is built and may inherit state from the one it
//! replaces.

use crate::align::AlignedDiff;
use crate::line::{DiffLine, TextDiff};
use crate::navigator::BlockNavigator;
use crate::range;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identifies what a diff was computed from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOption {
    pub path: PathBuf,
    /// Original path for renames
    pub org_path: Option<PathBuf>,
    /// Revisions the diff was taken between (empty for working copy)
    pub revisions: Vec<String>,
    pub unstaged: bool,
}

impl DiffOption {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_org_path(mut self, org_path: impl Into<PathBuf>) -> Self {
        self.org_path = Some(org_path.into());
        self
    }

    pub fn with_revisions<I, S>(mut self, revisions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.revisions = revisions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_unstaged(mut self, unstaged: bool) -> Self {
        self.unstaged = unstaged;
        self
    }
}

/// 2D scroll position of a diff view
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    pub const ZERO: ScrollOffset = ScrollOffset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rows currently on screen, 0-based inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRange {
    pub start: usize,
    pub end: usize,
}

/// Highlighted selection in a diff view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedChunk {
    pub y: f64,
    pub height: f64,
    pub start_idx: usize,
    pub end_idx: usize,
    pub combined: bool,
    pub is_old_side: bool,
}

impl SelectedChunk {
    pub fn is_changed(old: Option<&SelectedChunk>, new: Option<&SelectedChunk>) -> bool {
        match (old, new) {
            (None, None) => false,
            (Some(old), Some(new)) => {
                (new.y - old.y).abs() > 0.001
                    || (new.height - old.height).abs() > 0.001
                    || new.start_idx != old.start_idx
                    || new.end_idx != old.end_idx
                    || new.combined != old.combined
                    || new.is_old_side != old.is_old_side
            }
            _ => true,
        }
    }
}

/// How a diff is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Single column, the combined sequence as-is
    #[default]
    Combined,
    /// Old and new columns next to each other
    SideBySide,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Combined => ViewMode::SideBySide,
            ViewMode::SideBySide => ViewMode::Combined,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiffContext {
    option: DiffOption,
    data: TextDiff,
    /// Present in side-by-side mode
    aligned: Option<AlignedDiff>,
    navigator: BlockNavigator,
    scroll_offset: ScrollOffset,
    display_range: Option<DisplayRange>,
    selected_chunk: Option<SelectedChunk>,
}

impl DiffContext {
    pub fn new(
        mode: ViewMode,
        option: DiffOption,
        data: TextDiff,
        previous: Option<&DiffContext>,
    ) -> Self {
        let aligned = match mode {
            ViewMode::Combined => None,
            ViewMode::SideBySide => Some(AlignedDiff::new(&data.lines)),
        };

        let mut ctx = Self {
            option,
            data,
            aligned,
            navigator: BlockNavigator::default(),
            scroll_offset: ScrollOffset::ZERO,
            display_range: None,
            selected_chunk: None,
        };
        ctx.keep_previous_state(previous);

        tracing::debug!(
            path = %ctx.option.path.display(),
            ?mode,
            rows = ctx.row_count(),
            blocks = ctx.navigator.blocks().len(),
            "diff context built"
        );
        ctx
    }

    pub fn combined(option: DiffOption, data: TextDiff, previous: Option<&DiffContext>) -> Self {
        Self::new(ViewMode::Combined, option, data, previous)
    }

    pub fn side_by_side(
        option: DiffOption,
        data: TextDiff,
        previous: Option<&DiffContext>,
    ) -> Self {
        Self::new(ViewMode::SideBySide, option, data, previous)
    }

    /// Rebuild in the other layout, keeping block position and scroll
    pub fn switch_mode(&self) -> Self {
        Self::new(
            self.mode().toggled(),
            self.option.clone(),
            self.data.clone(),
            Some(self),
        )
    }

    /// Seed the navigator and scroll offset from the context being replaced.
    ///
    /// The block index survives only when both contexts describe the same
    /// diff; the scroll offset survives when they show the same file.
    fn keep_previous_state(&mut self, previous: Option<&DiffContext>) {
        let seed = match previous {
            Some(prev) if prev.option == self.option => prev.navigator.current_index(),
            _ => Some(0),
        };
        self.navigator = BlockNavigator::new(self.navigator_lines(), seed);

        self.scroll_offset = match previous {
            Some(prev) if prev.option.path == self.option.path => prev.scroll_offset,
            _ => ScrollOffset::ZERO,
        };
    }

    pub fn mode(&self) -> ViewMode {
        if self.aligned.is_some() {
            ViewMode::SideBySide
        } else {
            ViewMode::Combined
        }
    }

    pub fn is_side_by_side(&self) -> bool {
        self.aligned.is_some()
    }

    pub fn option(&self) -> &DiffOption {
        &self.option
    }

    pub fn data(&self) -> &TextDiff {
        &self.data
    }

    pub fn aligned(&self) -> Option<&AlignedDiff> {
        self.aligned.as_ref()
    }

    /// The sequence block line numbers index into
    pub fn navigator_lines(&self) -> &[DiffLine] {
        match &self.aligned {
            Some(aligned) => &aligned.old,
            None => &self.data.lines,
        }
    }

    /// Rows on screen: combined lines, or rows per column
    pub fn row_count(&self) -> usize {
        self.navigator_lines().len()
    }

    pub fn navigator(&self) -> &BlockNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut BlockNavigator {
        &mut self.navigator
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: ScrollOffset) {
        self.scroll_offset = offset;
    }

    pub fn display_range(&self) -> Option<DisplayRange> {
        self.display_range
    }

    pub fn set_display_range(&mut self, range: Option<DisplayRange>) {
        self.display_range = range;
    }

    pub fn selected_chunk(&self) -> Option<&SelectedChunk> {
        self.selected_chunk.as_ref()
    }

    /// Store `chunk`, returning whether it differs from the previous one
    pub fn set_selected_chunk(&mut self, chunk: Option<SelectedChunk>) -> bool {
        let changed = SelectedChunk::is_changed(self.selected_chunk.as_ref(), chunk.as_ref());
        if changed {
            self.selected_chunk = chunk;
        }
        changed
    }

    /// Map a row range of one column onto the combined lines
    pub fn combined_range_for_single_side(
        &self,
        start: usize,
        end: usize,
        is_old_side: bool,
    ) -> Option<(usize, usize)> {
        let aligned = self.aligned.as_ref()?;
        range::to_combined_range(self.data.len(), aligned.column(is_old_side), start, end)
    }

    /// Hunk of the combined lines touched by a row range of one column
    pub fn combined_range_for_both_sides(
        &self,
        start: usize,
        end: usize,
        is_old_side: bool,
    ) -> Option<(usize, usize)> {
        let aligned = self.aligned.as_ref()?;
        range::hunk_range_for_both_sides(
            &self.data.lines,
            aligned.column(is_old_side),
            aligned.column(!is_old_side),
            start,
            end,
        )
    }

    /// Hunk around a combined line
    pub fn hunk_range_at(&self, index: usize) -> Option<(usize, usize)> {
        range::hunk_range_at(&self.data.lines, index)
    }
}
