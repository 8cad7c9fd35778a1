//! Cursor over change blocks

use crate::block::{segment, Block};
use crate::line::DiffLine;
use serde::{Deserialize, Serialize};

/// Jump target for block navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    First,
    Prev,
    Next,
    Last,
}

/// Stateful cursor over the change blocks of one line sequence.
///
/// The cursor is only moved by [`goto`](Self::goto) and the caret/viewport
/// resync methods. Every move bumps [`revision`](Self::revision) so the host
/// knows to redraw the indicator.
#[derive(Debug, Clone, Default)]
pub struct BlockNavigator {
    blocks: Vec<Block>,
    current: Option<usize>,
    revision: u64,
}

impl BlockNavigator {
    /// Build blocks over `lines` and seed the cursor with block index `cur`,
    /// clamped to the last block
    pub fn new(lines: &[DiffLine], cur: Option<usize>) -> Self {
        let blocks = segment(lines);
        let current = if lines.is_empty() {
            None
        } else {
            match (blocks.len().checked_sub(1), cur) {
                (Some(last), Some(cur)) => Some(cur.min(last)),
                _ => None,
            }
        };
        tracing::debug!(blocks = blocks.len(), ?current, "block navigator built");
        Self {
            blocks,
            current,
            revision: 0,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_block(&self) -> Option<Block> {
        self.current.and_then(|idx| self.blocks.get(idx).copied())
    }

    /// Counter bumped whenever the indicator may have changed
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// "N/M" label for the block widget
    pub fn indicator(&self) -> String {
        if self.blocks.is_empty() {
            return "-/-".to_string();
        }
        match self.current_block_index_in_range() {
            Some(idx) => format!("{}/{}", idx + 1, self.blocks.len()),
            None => format!("-/{}", self.blocks.len()),
        }
    }

    pub fn goto(&mut self, direction: Direction) -> Option<Block> {
        let last = self.blocks.len().checked_sub(1)?;

        let target = match direction {
            Direction::First => 0,
            Direction::Prev => self.current.map_or(0, |cur| cur.saturating_sub(1)),
            Direction::Next => self.current.map_or(0, |cur| (cur + 1).min(last)),
            Direction::Last => last,
        };
        self.current = Some(target);
        tracing::trace!(?direction, current = target, "goto block");

        self.notify();
        self.blocks.get(target).copied()
    }

    pub fn goto_first(&mut self) -> Option<Block> {
        self.goto(Direction::First)
    }

    pub fn goto_prev(&mut self) -> Option<Block> {
        self.goto(Direction::Prev)
    }

    pub fn goto_next(&mut self) -> Option<Block> {
        self.goto(Direction::Next)
    }

    pub fn goto_last(&mut self) -> Option<Block> {
        self.goto(Direction::Last)
    }

    /// Resync the cursor from a 1-based caret line.
    ///
    /// Selects the block containing `caret_line`, else the last block that
    /// starts before it, else nothing.
    pub fn update_by_caret_position(&mut self, caret_line: usize) {
        let still_inside = self
            .current_block()
            .is_some_and(|block| block.contains(caret_line));

        if !still_inside {
            self.current = None;
            for (idx, block) in self.blocks.iter().enumerate() {
                if block.start > caret_line {
                    break;
                }
                self.current = Some(idx);
                if block.end >= caret_line {
                    break;
                }
            }
            tracing::trace!(caret_line, current = ?self.current, "caret resync");
        }

        self.notify();
    }

    /// Resync the cursor from the 1-based visible range `[start, end]`.
    ///
    /// Leaves the cursor alone while its block is on screen; otherwise moves
    /// it to the first visible block. Nothing changes if no block is visible.
    pub fn update_by_visible_range(&mut self, start: usize, end: usize) {
        if self
            .current_block()
            .is_some_and(|block| block.intersects(start, end))
        {
            return;
        }

        if let Some(idx) = self.blocks.iter().position(|b| b.intersects(start, end)) {
            self.current = Some(idx);
            self.notify();
        }
    }

    fn current_block_index_in_range(&self) -> Option<usize> {
        self.current.filter(|&idx| idx < self.blocks.len())
    }

    fn notify(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
