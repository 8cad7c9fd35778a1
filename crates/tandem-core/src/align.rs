//! Two-column alignment of a combined diff

use crate::block::{segment, Block};
use crate::line::{DiffLine, LineKind};
use serde::Serialize;

/// Old and new columns of equal length plus their change blocks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlignedDiff {
    pub old: Vec<DiffLine>,
    pub new: Vec<DiffLine>,
    pub blocks: Vec<Block>,
}

impl AlignedDiff {
    pub fn new(lines: &[DiffLine]) -> Self {
        let (old, new) = align(lines);
        // Both columns share block geometry, segment the old one
        let blocks = segment(&old);
        Self { old, new, blocks }
    }

    /// Number of rows in each column
    pub fn len(&self) -> usize {
        self.old.len()
    }

    pub fn is_empty(&self) -> bool {
        self.old.is_empty()
    }

    pub fn column(&self, old_side: bool) -> &[DiffLine] {
        if old_side {
            &self.old
        } else {
            &self.new
        }
    }
}

/// Split `lines` into old and new columns.
///
/// Deleted lines only go left and added lines only go right. Before a
/// context or header row is appended to both sides the shorter column is
/// padded, so each add/delete run ends up as one equal-height bubble. The
/// trailing run is padded once the input is exhausted.
pub fn align(lines: &[DiffLine]) -> (Vec<DiffLine>, Vec<DiffLine>) {
    let mut old = Vec::with_capacity(lines.len());
    let mut new = Vec::with_capacity(lines.len());

    for line in lines {
        match line.kind {
            LineKind::Added => new.push(line.clone()),
            LineKind::Deleted => old.push(line.clone()),
            _ => {
                fill_empty_lines(&mut old, &mut new);
                old.push(line.clone());
                new.push(line.clone());
            }
        }
    }

    fill_empty_lines(&mut old, &mut new);
    (old, new)
}

fn fill_empty_lines(old: &mut Vec<DiffLine>, new: &mut Vec<DiffLine>) {
    let target = old.len().max(new.len());
    old.resize_with(target, DiffLine::empty);
    new.resize_with(target, DiffLine::empty);
}
