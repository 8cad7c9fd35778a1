//! Multi-file diff session

use crate::context::{DiffContext, DiffOption, ViewMode};
use crate::unified::{parse_patch, FilePatch, FileStatus, ParseError, PatchContent};
use rustc_hash::FxHashMap;
use std::path::PathBuf;

/// A file entry in a multi-file diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub old_path: Option<PathBuf>,
    pub display_name: String,
    pub status: FileStatus,
    pub insertions: usize,
    pub deletions: usize,
    /// False for binary, LFS and mode-only changes
    pub has_text: bool,
}

impl FileEntry {
    fn from_patch(patch: &FilePatch) -> Self {
        let display_name = match &patch.old_path {
            Some(old) if patch.status == FileStatus::Renamed => {
                format!("{} → {}", old.display(), patch.path.display())
            }
            _ => patch.path.display().to_string(),
        };
        Self {
            path: patch.path.clone(),
            old_path: patch.old_path.clone(),
            display_name,
            status: patch.status,
            insertions: patch.insertions(),
            deletions: patch.deletions(),
            has_text: patch.text().is_some(),
        }
    }
}

/// All files of one patch plus their view state
pub struct DiffSession {
    /// All files in the patch
    pub files: Vec<FileEntry>,
    /// Currently selected file index
    pub selected_index: usize,
    view_mode: ViewMode,
    patches: Vec<FilePatch>,
    /// Contexts for each file (lazy built)
    contexts: Vec<Option<DiffContext>>,
}

impl DiffSession {
    pub fn from_patch(text: &str, view_mode: ViewMode) -> Result<Self, ParseError> {
        let patches = parse_patch(text)?;
        Ok(Self::from_file_patches(patches, view_mode))
    }

    pub fn from_file_patches(patches: Vec<FilePatch>, view_mode: ViewMode) -> Self {
        let files = patches.iter().map(FileEntry::from_patch).collect();
        let contexts = (0..patches.len()).map(|_| None).collect();
        Self {
            files,
            selected_index: 0,
            view_mode,
            patches,
            contexts,
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_multi_file(&self) -> bool {
        self.files.len() > 1
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn current_file(&self) -> Option<&FileEntry> {
        self.files.get(self.selected_index)
    }

    pub fn current_patch(&self) -> Option<&FilePatch> {
        self.patches.get(self.selected_index)
    }

    pub fn patches(&self) -> &[FilePatch] {
        &self.patches
    }

    pub fn select(&mut self, index: usize) {
        if index < self.files.len() {
            self.selected_index = index;
        }
    }

    pub fn next_file(&mut self) -> bool {
        if self.selected_index + 1 < self.files.len() {
            self.selected_index += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_file(&mut self) -> bool {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            true
        } else {
            false
        }
    }

    /// Context of the selected file, built on first access.
    ///
    /// `None` for files without text content.
    pub fn current_context(&mut self) -> Option<&mut DiffContext> {
        self.context_at(self.selected_index)
    }

    pub fn context_at(&mut self, index: usize) -> Option<&mut DiffContext> {
        let text = self.patches.get(index)?.text()?;
        let slot = self.contexts.get_mut(index)?;
        if slot.is_none() {
            let option = option_for(&self.patches[index]);
            *slot = Some(DiffContext::new(self.view_mode, option, text.clone(), None));
        }
        slot.as_mut()
    }

    /// Switch every built context to the other layout
    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggled();
        for slot in &mut self.contexts {
            if let Some(ctx) = slot.as_mut() {
                *ctx = ctx.switch_mode();
            }
        }
    }

    /// Replace the patch, carrying block position and scroll over to files
    /// that are still present
    pub fn refresh(&mut self, text: &str) -> Result<(), ParseError> {
        let patches = parse_patch(text)?;
        let selected_path = self.current_file().map(|f| f.path.clone());

        let mut previous: FxHashMap<PathBuf, DiffContext> = FxHashMap::default();
        for (entry, slot) in self.files.iter().zip(self.contexts.iter_mut()) {
            if let Some(ctx) = slot.take() {
                previous.insert(entry.path.clone(), ctx);
            }
        }

        let contexts = patches
            .iter()
            .map(|patch| {
                let prev = previous.get(&patch.path)?;
                let text = patch.text()?;
                Some(DiffContext::new(
                    self.view_mode,
                    option_for(patch),
                    text.clone(),
                    Some(prev),
                ))
            })
            .collect();

        self.files = patches.iter().map(FileEntry::from_patch).collect();
        self.patches = patches;
        self.contexts = contexts;
        self.selected_index = selected_path
            .and_then(|path| self.files.iter().position(|f| f.path == path))
            .unwrap_or(0)
            .min(self.files.len().saturating_sub(1));

        tracing::debug!(
            files = self.files.len(),
            carried = previous.len(),
            "session refreshed"
        );
        Ok(())
    }

    /// Describe the selected file when it has no text to show
    pub fn placeholder(&self) -> Option<String> {
        self.placeholder_at(self.selected_index)
    }

    pub fn placeholder_at(&self, index: usize) -> Option<String> {
        let patch = self.patches.get(index)?;
        match &patch.content {
            PatchContent::Text(_) => None,
            PatchContent::Binary => Some("Binary file (not shown)".to_string()),
            PatchContent::Lfs(lfs) => Some(format!(
                "LFS object changed: {} ({} bytes) → {} ({} bytes)",
                short_oid(&lfs.old.oid),
                lfs.old.size,
                short_oid(&lfs.new.oid),
                lfs.new.size
            )),
            PatchContent::NoChange => Some(match (&patch.old_mode, &patch.new_mode) {
                (Some(old), Some(new)) => format!("Mode changed: {} → {}", old, new),
                _ => "No content changes".to_string(),
            }),
        }
    }
}

fn option_for(patch: &FilePatch) -> DiffOption {
    let mut option = DiffOption::new(patch.path.clone());
    option.org_path = patch.old_path.clone();
    option.revisions = match (&patch.old_hash, &patch.new_hash) {
        (Some(old), Some(new)) => vec![old.clone(), new.clone()],
        _ => Vec::new(),
    };
    option
}

fn short_oid(oid: &str) -> &str {
    oid.get(..10).unwrap_or(oid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ScrollOffset;

    const TWO_FILES: &str = "\
diff --git a/one.txt b/one.txt
index 1111111..2222222 100644
--- a/one.txt
+++ b/one.txt
@@ -1,5 +1,5 @@
 a
-b
+B
 c
-d
+D
 e
diff --git a/two.bin b/two.bin
index 3333333..4444444 100644
Binary files a/two.bin and b/two.bin differ
";

    #[test]
    fn test_from_patch_lists_files() {
        let session = DiffSession::from_patch(TWO_FILES, ViewMode::SideBySide).unwrap();
        assert_eq!(session.file_count(), 2);
        assert!(session.is_multi_file());
        assert_eq!(session.files[0].display_name, "one.txt");
        assert_eq!(session.files[0].insertions, 2);
        assert_eq!(session.files[0].deletions, 2);
        assert!(session.files[0].has_text);
        assert!(!session.files[1].has_text);
    }

    #[test]
    fn test_file_navigation_is_clamped() {
        let mut session = DiffSession::from_patch(TWO_FILES, ViewMode::Combined).unwrap();
        assert!(!session.prev_file());
        assert!(session.next_file());
        assert!(!session.next_file());
        assert_eq!(session.selected_index, 1);

        session.select(7);
        assert_eq!(session.selected_index, 1);
        session.select(0);
        assert_eq!(session.selected_index, 0);
    }

    #[test]
    fn test_contexts_are_built_lazily() {
        let mut session = DiffSession::from_patch(TWO_FILES, ViewMode::SideBySide).unwrap();
        let ctx = session.current_context().unwrap();
        assert!(ctx.is_side_by_side());
        assert_eq!(ctx.navigator().indicator(), "1/2");
        assert_eq!(ctx.option().revisions, vec!["1111111", "2222222"]);

        session.next_file();
        assert!(session.current_context().is_none());
        assert_eq!(
            session.placeholder().as_deref(),
            Some("Binary file (not shown)")
        );
    }

    #[test]
    fn test_toggle_view_mode_keeps_block() {
        let mut session = DiffSession::from_patch(TWO_FILES, ViewMode::Combined).unwrap();
        session.current_context().unwrap().navigator_mut().goto_last();

        session.toggle_view_mode();
        assert_eq!(session.view_mode(), ViewMode::SideBySide);
        let ctx = session.current_context().unwrap();
        assert!(ctx.is_side_by_side());
        assert_eq!(ctx.navigator().indicator(), "2/2");
    }

    #[test]
    fn test_refresh_carries_state_by_path() {
        let mut session = DiffSession::from_patch(TWO_FILES, ViewMode::SideBySide).unwrap();
        {
            let ctx = session.current_context().unwrap();
            ctx.navigator_mut().goto_last();
            ctx.set_scroll_offset(ScrollOffset::new(0.0, 2.0));
        }

        // Same revisions, one more change at the end
        let refreshed = TWO_FILES
            .replace("@@ -1,5 +1,5 @@", "@@ -1,5 +1,6 @@")
            .replace(" e\n", " e\n+f\n");
        session.refresh(&refreshed).unwrap();

        assert_eq!(session.selected_index, 0);
        let ctx = session.current_context().unwrap();
        assert_eq!(ctx.navigator().indicator(), "2/3");
        assert_eq!(ctx.scroll_offset(), ScrollOffset::new(0.0, 2.0));
    }

    #[test]
    fn test_refresh_follows_selected_file() {
        let mut session = DiffSession::from_patch(TWO_FILES, ViewMode::Combined).unwrap();
        session.next_file();

        let only_binary = TWO_FILES
            .split("diff --git a/two.bin")
            .nth(1)
            .map(|rest| format!("diff --git a/two.bin{}", rest))
            .unwrap();
        session.refresh(&only_binary).unwrap();

        assert_eq!(session.file_count(), 1);
        assert_eq!(session.selected_index, 0);
        assert_eq!(session.current_file().unwrap().path, PathBuf::from("two.bin"));
    }
}
