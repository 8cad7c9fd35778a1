//! Mapping split-column ranges back onto the combined sequence

use crate::line::{DiffLine, LineKind};

/// Project `[start, end]` of one split column onto the combined sequence.
///
/// Indices are 0-based. Padding rows at either edge of the range are
/// skipped; a range made only of padding has no counterpart and yields
/// `None`, as does an empty combined sequence.
pub fn to_combined_range(
    combined_len: usize,
    column: &[DiffLine],
    start: usize,
    end: usize,
) -> Option<(usize, usize)> {
    let end = end.min(combined_len.checked_sub(1)?);
    if start > end {
        return None;
    }

    let first = (start..=end.min(column.len().checked_sub(1)?))
        .find(|&idx| !column[idx].is_empty())?;
    let last = (start..=end.min(column.len() - 1))
        .rev()
        .find(|&idx| !column[idx].is_empty())?;

    Some((column[first].origin?, column[last].origin?))
}

/// Expand `index` of the combined sequence to the hunk around it.
///
/// The range runs from the nearest hunk header, or the second of two
/// consecutive context rows, on each side of `index`. Returns `None` when
/// the expansion holds no changed rows.
pub fn hunk_range_at(lines: &[DiffLine], index: usize) -> Option<(usize, usize)> {
    if index >= lines.len() {
        return None;
    }

    let mut start = 0;
    let mut end = lines.len() - 1;
    let mut modified = 0usize;

    let mut context_run = 0;
    for idx in (0..=index).rev() {
        match lines[idx].kind {
            LineKind::Header => {
                start = idx;
                break;
            }
            LineKind::Context => {
                context_run += 1;
                if context_run >= 2 {
                    start = idx;
                    break;
                }
            }
            _ => {
                context_run = 0;
                modified += 1;
            }
        }
    }

    context_run = usize::from(lines[index].kind == LineKind::Context);
    for (idx, line) in lines.iter().enumerate().skip(index + 1) {
        match line.kind {
            LineKind::Header => {
                end = idx;
                break;
            }
            LineKind::Context => {
                context_run += 1;
                if context_run >= 2 {
                    end = idx;
                    break;
                }
            }
            _ => {
                context_run = 0;
                modified += 1;
            }
        }
    }

    (modified > 0).then_some((start, end))
}

/// Find the hunk touched by `[start, end]` of the `from` column.
///
/// The first added or deleted row in the range picks the hunk. A padding
/// row picks it through the real line facing it in `other`.
pub fn hunk_range_for_both_sides(
    combined: &[DiffLine],
    from: &[DiffLine],
    other: &[DiffLine],
    start: usize,
    end: usize,
) -> Option<(usize, usize)> {
    let end = end.min(from.len().checked_sub(1)?);

    for idx in start..=end {
        let line = &from[idx];
        let changed = match line.kind {
            LineKind::Added | LineKind::Deleted => Some(line),
            LineKind::Empty => other.get(idx),
            _ => None,
        };
        if let Some(changed) = changed {
            return hunk_range_at(combined, changed.origin?);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::line::TextDiff;

    /// 0 @@
    /// 1 ctx a
    /// 2 del b
    /// 3 del c
    /// 4 add B
    /// 5 ctx d
    /// 6 ctx e
    /// 7 add f
    fn sample() -> TextDiff {
        TextDiff::new(
            "f.txt",
            vec![
                DiffLine::header("@@ -1,5 +1,5 @@"),
                DiffLine::context("a", 1, 1),
                DiffLine::deleted("b", 2),
                DiffLine::deleted("c", 3),
                DiffLine::added("B", 2),
                DiffLine::context("d", 4, 3),
                DiffLine::context("e", 5, 4),
                DiffLine::added("f", 5),
            ],
        )
    }

    #[test]
    fn test_maps_new_column_range() {
        let diff = sample();
        let (_, new) = align(&diff.lines);
        // new: @@ a B _ d e f
        assert!(new[3].is_empty());

        assert_eq!(to_combined_range(diff.len(), &new, 2, 2), Some((4, 4)));
        assert_eq!(to_combined_range(diff.len(), &new, 2, 4), Some((4, 5)));
        assert_eq!(to_combined_range(diff.len(), &new, 3, 6), Some((5, 7)));
    }

    #[test]
    fn test_maps_old_column_range() {
        let diff = sample();
        let (old, _) = align(&diff.lines);
        // old: @@ a b c d e _
        assert_eq!(to_combined_range(diff.len(), &old, 1, 3), Some((1, 3)));
        assert_eq!(to_combined_range(diff.len(), &old, 5, 6), Some((6, 6)));
    }

    #[test]
    fn test_padding_only_range_has_no_mapping() {
        let diff = sample();
        let (old, new) = align(&diff.lines);
        assert_eq!(to_combined_range(diff.len(), &new, 3, 3), None);
        assert_eq!(to_combined_range(diff.len(), &old, 6, 6), None);
    }

    #[test]
    fn test_end_is_clamped() {
        let diff = sample();
        let (old, _) = align(&diff.lines);
        assert_eq!(to_combined_range(diff.len(), &old, 4, 500), Some((5, 6)));
        assert_eq!(to_combined_range(0, &old, 0, 3), None);
        assert_eq!(to_combined_range(diff.len(), &old, 9, 12), None);
    }

    #[test]
    fn test_hunk_range_stops_at_header_and_context_pair() {
        let diff = sample();
        assert_eq!(hunk_range_at(&diff.lines, 3), Some((0, 6)));
        assert_eq!(hunk_range_at(&diff.lines, 7), Some((5, 7)));
    }

    #[test]
    fn test_hunk_range_without_changes() {
        let lines = TextDiff::new(
            "f",
            vec![
                DiffLine::header("@@"),
                DiffLine::context("a", 1, 1),
                DiffLine::context("b", 2, 2),
                DiffLine::context("c", 3, 3),
            ],
        )
        .lines;
        assert_eq!(hunk_range_at(&lines, 2), None);
        assert_eq!(hunk_range_at(&lines, 10), None);
    }

    #[test]
    fn test_hunk_range_for_both_sides_uses_other_column_on_padding() {
        let diff = sample();
        let (old, new) = align(&diff.lines);

        // new[3] is padding facing the deleted "c"
        assert_eq!(
            hunk_range_for_both_sides(&diff.lines, &new, &old, 3, 3),
            Some((0, 6))
        );
        assert_eq!(
            hunk_range_for_both_sides(&diff.lines, &old, &new, 4, 20),
            Some((5, 7))
        );
        assert_eq!(hunk_range_for_both_sides(&diff.lines, &old, &new, 0, 1), None);
    }
}
