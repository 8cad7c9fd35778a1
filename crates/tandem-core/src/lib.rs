//! Tandem Core - side-by-side diff alignment and change-block navigation
//!
//! This library turns a combined sequence of tagged diff lines into two
//! aligned columns, splits them into change blocks, and keeps a cursor over
//! those blocks in sync with a caret or viewport.

pub mod align;
pub mod block;
pub mod context;
pub mod line;
pub mod navigator;
pub mod range;
pub mod session;
pub mod unified;

pub use align::{align, AlignedDiff};
pub use block::{segment, Block};
pub use context::{DiffContext, DiffOption, DisplayRange, ScrollOffset, SelectedChunk, ViewMode};
pub use line::{DiffLine, LineKind, TextDiff};
pub use navigator::{BlockNavigator, Direction};
pub use range::{hunk_range_at, hunk_range_for_both_sides, to_combined_range};
pub use session::{DiffSession, FileEntry};
pub use unified::{parse_patch, FilePatch, FileStatus, LfsDiff, LfsObject, ParseError, PatchContent};
