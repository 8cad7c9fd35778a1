//! Change-block segmentation

use crate::line::DiffLine;
use serde::{Deserialize, Serialize};

/// A maximal run of changed rows, 1-based and inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub start: usize,
    pub end: usize,
}

impl Block {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "block start {} after end {}", start, end);
        Self { start, end }
    }

    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }

    /// Whether any row of `[start, end]` falls inside this block
    pub fn intersects(&self, start: usize, end: usize) -> bool {
        self.start <= end && self.end >= start
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Partition `lines` into blocks of added, deleted and padding rows.
///
/// Works over a split column as well as over the combined sequence: context
/// and header rows close a run, everything else extends it.
pub fn segment(lines: &[DiffLine]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut block_start: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        if line.kind.is_change() {
            if block_start.is_none() {
                block_start = Some(line_no);
            }
        } else if let Some(start) = block_start.take() {
            blocks.push(Block::new(start, line_no - 1));
        }
    }

    if let Some(start) = block_start {
        blocks.push(Block::new(start, lines.len()));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> DiffLine {
        DiffLine::context("c", 1, 1)
    }

    #[test]
    fn test_empty_input_has_no_blocks() {
        assert!(segment(&[]).is_empty());
    }

    #[test]
    fn test_context_only_has_no_blocks() {
        assert!(segment(&[ctx(), DiffLine::header("@@"), ctx()]).is_empty());
    }

    #[test]
    fn test_blocks_are_closed_by_context_and_end() {
        let lines = vec![
            ctx(),
            DiffLine::deleted("a", 2),
            DiffLine::empty(),
            ctx(),
            ctx(),
            DiffLine::added("b", 5),
            DiffLine::header("@@"),
            DiffLine::added("c", 9),
            DiffLine::added("d", 10),
        ];

        let blocks = segment(&lines);
        assert_eq!(
            blocks,
            vec![Block::new(2, 3), Block::new(6, 6), Block::new(8, 9)]
        );
    }

    #[test]
    fn test_blocks_partition_changed_rows() {
        let lines = vec![
            DiffLine::added("a", 1),
            ctx(),
            DiffLine::deleted("b", 2),
            DiffLine::added("c", 3),
            ctx(),
            DiffLine::empty(),
        ];
        let blocks = segment(&lines);

        for (idx, line) in lines.iter().enumerate() {
            let owners = blocks.iter().filter(|b| b.contains(idx + 1)).count();
            let expected = usize::from(line.kind.is_change());
            assert_eq!(owners, expected, "row {}", idx + 1);
        }
        for pair in blocks.windows(2) {
            assert!(pair[0].end + 1 < pair[1].start, "blocks must not touch");
        }
    }

    #[test]
    fn test_block_contains_and_intersects() {
        let block = Block::new(4, 6);
        assert!(!block.contains(3));
        assert!(block.contains(4));
        assert!(block.contains(6));
        assert!(!block.contains(7));
        assert_eq!(block.len(), 3);

        assert!(block.intersects(1, 4));
        assert!(block.intersects(5, 5));
        assert!(block.intersects(6, 20));
        assert!(!block.intersects(7, 9));
        assert!(!block.intersects(1, 3));
    }
}
