//! Tagged diff lines and the combined line sequence

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of a diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineKind {
    /// Unchanged line present on both sides
    #[default]
    Context,
    /// Line only present in the new file
    Added,
    /// Line only present in the old file
    Deleted,
    /// Hunk header (`@@ -a,b +c,d @@`)
    Header,
    /// Padding row inserted by the aligner
    Empty,
}

impl LineKind {
    /// Rows that start or extend a change block
    pub fn is_change(self) -> bool {
        matches!(self, LineKind::Added | LineKind::Deleted | LineKind::Empty)
    }

    /// Rows that force both columns back into line before they are appended
    pub fn is_seam(self) -> bool {
        matches!(self, LineKind::Context | LineKind::Header)
    }
}

/// A single row of a unified diff
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiffLine {
    pub kind: LineKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_line: Option<u32>,
    /// Position of this line in its combined sequence (None for padding)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<usize>,
    #[serde(default)]
    pub no_newline_at_eof: bool,
}

impl DiffLine {
    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
            ..Self::default()
        }
    }

    pub fn added(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Added,
            content: content.into(),
            new_line: Some(new_line),
            ..Self::default()
        }
    }

    pub fn deleted(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Deleted,
            content: content.into(),
            old_line: Some(old_line),
            ..Self::default()
        }
    }

    pub fn header(content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Header,
            content: content.into(),
            ..Self::default()
        }
    }

    /// Padding row. Carries no content, numbers or origin.
    pub fn empty() -> Self {
        Self {
            kind: LineKind::Empty,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == LineKind::Empty
    }
}

/// The combined (unsplit) line sequence of one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDiff {
    pub file: PathBuf,
    pub lines: Vec<DiffLine>,
    /// Largest old or new line number, used to size gutters
    pub max_line_number: u32,
}

impl TextDiff {
    /// Build the combined sequence, stamping each line with its position
    pub fn new(file: impl Into<PathBuf>, mut lines: Vec<DiffLine>) -> Self {
        let mut max_line_number = 0;
        for (idx, line) in lines.iter_mut().enumerate() {
            line.origin = Some(idx);
            let number = line.old_line.max(line.new_line).unwrap_or(0);
            max_line_number = max_line_number.max(number);
        }
        Self {
            file: file.into(),
            lines,
            max_line_number,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn insertions(&self) -> usize {
        self.lines.iter().filter(|l| l.kind == LineKind::Added).count()
    }

    pub fn deletions(&self) -> usize {
        self.lines.iter().filter(|l| l.kind == LineKind::Deleted).count()
    }
}
