//! Unified patch parsing
//!
//! Turns `git diff` / `diff -u` output into per-file line sequences. Within a
//! change run deleted rows are emitted before added rows, so each run reads
//! as "old lines, then their replacements".

use crate::line::{DiffLine, TextDiff};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid hunk header: {0}")]
    InvalidHunkHeader(String),
    #[error("Invalid LFS object size: {0}")]
    InvalidLfsSize(String),
}

/// Status of a file in a patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub enum FileStatus {
    #[default]
    Modified,
    Added,
    Deleted,
    Renamed,
}

impl FileStatus {
    pub fn symbol(self) -> char {
        match self {
            FileStatus::Modified => 'M',
            FileStatus::Added => 'A',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
        }
    }
}

/// One side of a Git LFS pointer change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LfsObject {
    pub oid: String,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LfsDiff {
    pub old: LfsObject,
    pub new: LfsObject,
}

/// What a file section of the patch contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchContent {
    Text(TextDiff),
    Binary,
    Lfs(LfsDiff),
    /// Mode-only change or empty section
    NoChange,
}

/// A parsed file section of a patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    pub path: PathBuf,
    /// For renamed files, the original path
    pub old_path: Option<PathBuf>,
    pub status: FileStatus,
    pub old_mode: Option<String>,
    pub new_mode: Option<String>,
    pub old_hash: Option<String>,
    pub new_hash: Option<String>,
    pub content: PatchContent,
}

impl FilePatch {
    pub fn text(&self) -> Option<&TextDiff> {
        match &self.content {
            PatchContent::Text(diff) => Some(diff),
            _ => None,
        }
    }

    pub fn insertions(&self) -> usize {
        self.text().map_or(0, TextDiff::insertions)
    }

    pub fn deletions(&self) -> usize {
        self.text().map_or(0, TextDiff::deletions)
    }
}

const LFS_SPEC: &str = "version https://git-lfs.github.com/spec/";
const NO_NEWLINE: &str = "\\ No newline at end of file";
const DEV_NULL: &str = "/dev/null";

fn hunk_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("hunk header regex")
    })
}

fn index_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^index\s([0-9a-f]{6,64})\.\.([0-9a-f]{6,64})").expect("index regex")
    })
}

/// Parse a patch holding one or more files.
///
/// Sections start at `diff --git` lines. Text without any such line is read
/// as a single file named by its `---`/`+++` lines. Commit headers from
/// `git show` / `git format-patch` and their trailers are skipped.
pub fn parse_patch(text: &str) -> Result<Vec<FilePatch>, ParseError> {
    let mut files = Vec::new();
    let mut current: Option<FileParser> = None;

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            if let Some(parser) = current.take() {
                push_file(&mut files, parser);
            }
            current = Some(FileParser::from_git_header(rest));
            continue;
        }

        current
            .get_or_insert_with(FileParser::default)
            .parse_line(line)?;
    }

    if let Some(parser) = current {
        push_file(&mut files, parser);
    }

    tracing::debug!(files = files.len(), "patch parsed");
    Ok(files)
}

fn push_file(files: &mut Vec<FilePatch>, parser: FileParser) {
    let patch = parser.finish();
    // Text without a path or any file data is not a file
    if patch.path.as_os_str().is_empty() && patch.content == PatchContent::NoChange {
        tracing::trace!("skipping section without file data");
        return;
    }
    files.push(patch);
}

#[derive(Debug, Clone, Copy)]
enum LastLine {
    Committed(usize),
    Deleted(usize),
    Added(usize),
}

#[derive(Debug, Default)]
struct FileParser {
    path: Option<PathBuf>,
    old_path: Option<PathBuf>,
    status: FileStatus,
    old_mode: Option<String>,
    new_mode: Option<String>,
    old_hash: Option<String>,
    new_hash: Option<String>,
    is_binary: bool,
    lfs: Option<LfsDiff>,
    lines: Vec<DiffLine>,
    deleted: Vec<DiffLine>,
    added: Vec<DiffLine>,
    last: Option<LastLine>,
    in_hunk: bool,
    old_line: u32,
    new_line: u32,
    /// Body lines the hunk header still promises for each side
    old_remaining: u32,
    new_remaining: u32,
}

impl FileParser {
    /// `rest` is `a/<old> b/<new>`
    fn from_git_header(rest: &str) -> Self {
        let (old, new) = match rest.rfind(" b/") {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (rest, rest),
        };
        let old = strip_side_prefix(old);
        let new = strip_side_prefix(new);

        Self {
            path: Some(PathBuf::from(new)),
            old_path: (old != new).then(|| PathBuf::from(old)),
            ..Self::default()
        }
    }

    fn parse_line(&mut self, line: &str) -> Result<(), ParseError> {
        if self.is_binary {
            return Ok(());
        }

        if self.lfs.is_some() {
            return self.parse_lfs_line(line);
        }

        // Follows the last line of a hunk, so it may come after the hunk ends
        if line == NO_NEWLINE {
            self.mark_no_newline();
            return Ok(());
        }

        if self.in_hunk && !self.fits_hunk(line) {
            self.end_hunk();
        }

        if !self.in_hunk {
            return self.parse_meta_line(line);
        }

        if line.is_empty() {
            self.flush_changes();
            self.push_context(String::new());
            self.end_hunk_if_done();
            return Ok(());
        }

        match line.as_bytes()[0] {
            b'-' => {
                if self.old_line == 1 && self.new_line == 0 && line[1..].starts_with(LFS_SPEC) {
                    self.lfs = Some(LfsDiff::default());
                    return Ok(());
                }
                self.deleted.push(DiffLine::deleted(&line[1..], self.old_line));
                self.last = Some(LastLine::Deleted(self.deleted.len() - 1));
                self.old_line += 1;
                self.old_remaining -= 1;
            }
            b'+' => {
                if self.old_line == 0 && self.new_line == 1 && line[1..].starts_with(LFS_SPEC) {
                    self.lfs = Some(LfsDiff::default());
                    return Ok(());
                }
                self.added.push(DiffLine::added(&line[1..], self.new_line));
                self.last = Some(LastLine::Added(self.added.len() - 1));
                self.new_line += 1;
                self.new_remaining -= 1;
            }
            b'\\' => {}
            _ => {
                self.flush_changes();
                if line.starts_with("@@") {
                    self.push_hunk_header(line)?;
                } else {
                    let body = without_first_char(line);
                    if self.old_line == 1 && self.new_line == 1 && body.starts_with(LFS_SPEC) {
                        self.lfs = Some(LfsDiff::default());
                        return Ok(());
                    }
                    self.push_context(body.to_string());
                }
            }
        }

        self.end_hunk_if_done();
        Ok(())
    }

    /// Whether `line` still belongs to the current hunk body
    fn fits_hunk(&self, line: &str) -> bool {
        match line.as_bytes().first().copied() {
            Some(b'-') => self.old_remaining > 0,
            Some(b'+') => self.new_remaining > 0,
            Some(b'@') if line.starts_with("@@") => true,
            Some(b'\\') => true,
            _ => self.old_remaining > 0 && self.new_remaining > 0,
        }
    }

    fn end_hunk_if_done(&mut self) {
        if self.in_hunk && self.old_remaining == 0 && self.new_remaining == 0 {
            self.end_hunk();
        }
    }

    fn end_hunk(&mut self) {
        self.flush_changes();
        self.in_hunk = false;
    }

    fn parse_meta_line(&mut self, line: &str) -> Result<(), ParseError> {
        if line.starts_with("@@") {
            return self.push_hunk_header(line);
        }

        if let Some(mode) = line.strip_prefix("old mode ") {
            self.old_mode = Some(mode.to_string());
        } else if let Some(mode) = line.strip_prefix("new mode ") {
            self.new_mode = Some(mode.to_string());
        } else if let Some(mode) = line.strip_prefix("deleted file mode ") {
            self.old_mode = Some(mode.to_string());
            self.status = FileStatus::Deleted;
        } else if let Some(mode) = line.strip_prefix("new file mode ") {
            self.new_mode = Some(mode.to_string());
            self.status = FileStatus::Added;
        } else if let Some(from) = line.strip_prefix("rename from ") {
            self.old_path = Some(PathBuf::from(from));
            self.status = FileStatus::Renamed;
        } else if let Some(to) = line.strip_prefix("rename to ") {
            self.path = Some(PathBuf::from(to));
            self.status = FileStatus::Renamed;
        } else if let Some(old) = line.strip_prefix("--- ") {
            let old = trim_timestamp(old);
            if old == DEV_NULL {
                self.status = FileStatus::Added;
            } else if self.path.is_none() {
                // Plain `diff -u` output, no git header to name the file
                self.path = Some(PathBuf::from(strip_side_prefix(old)));
            }
        } else if let Some(new) = line.strip_prefix("+++ ") {
            let new = trim_timestamp(new);
            if new == DEV_NULL {
                self.status = FileStatus::Deleted;
            } else if self.status != FileStatus::Renamed {
                self.path = Some(PathBuf::from(strip_side_prefix(new)));
            }
        } else if line.starts_with("Binary files ") || line == "GIT binary patch" {
            self.is_binary = true;
        } else if let Some(caps) = index_regex().captures(line) {
            self.old_hash = Some(caps[1].to_string());
            self.new_hash = Some(caps[2].to_string());
        }

        Ok(())
    }

    fn parse_lfs_line(&mut self, line: &str) -> Result<(), ParseError> {
        let Some(lfs) = self.lfs.as_mut() else {
            return Ok(());
        };

        if let Some(oid) = line.strip_prefix("-oid sha256:") {
            lfs.old.oid = oid.to_string();
        } else if let Some(oid) = line.strip_prefix("+oid sha256:") {
            lfs.new.oid = oid.to_string();
        } else if let Some(size) = line.strip_prefix("-size ") {
            lfs.old.size = parse_lfs_size(size)?;
        } else if let Some(size) = line.strip_prefix("+size ") {
            lfs.new.size = parse_lfs_size(size)?;
        } else if let Some(size) = line.strip_prefix(" size ") {
            let size = parse_lfs_size(size)?;
            lfs.old.size = size;
            lfs.new.size = size;
        }

        Ok(())
    }

    fn push_hunk_header(&mut self, line: &str) -> Result<(), ParseError> {
        let Some(caps) = hunk_header_regex().captures(line) else {
            // Not a hunk header after all, e.g. "@@@" combined diffs
            return Ok(());
        };
        let invalid = || ParseError::InvalidHunkHeader(line.to_string());
        // A missing count means one line
        let parse = |idx: usize| match caps.get(idx) {
            Some(m) => m.as_str().parse::<u32>().map_err(|_| invalid()),
            None => Ok(1),
        };
        let (old_start, old_count) = (parse(1)?, parse(2)?);
        let (new_start, new_count) = (parse(3)?, parse(4)?);
        // Every body line gets a number, so the last one must fit too
        if old_start.checked_add(old_count).is_none() || new_start.checked_add(new_count).is_none()
        {
            return Err(invalid());
        }

        self.old_line = old_start;
        self.new_line = new_start;
        self.old_remaining = old_count;
        self.new_remaining = new_count;
        self.in_hunk = old_count > 0 || new_count > 0;

        self.lines.push(DiffLine::header(line));
        self.last = Some(LastLine::Committed(self.lines.len() - 1));
        Ok(())
    }

    fn push_context(&mut self, content: String) {
        self.lines
            .push(DiffLine::context(content, self.old_line, self.new_line));
        self.last = Some(LastLine::Committed(self.lines.len() - 1));
        self.old_line += 1;
        self.new_line += 1;
        self.old_remaining -= 1;
        self.new_remaining -= 1;
    }

    /// Commit the pending change run, deletions first
    fn flush_changes(&mut self) {
        if self.deleted.is_empty() && self.added.is_empty() {
            return;
        }

        let deleted_base = self.lines.len();
        let added_base = deleted_base + self.deleted.len();
        self.last = match self.last {
            Some(LastLine::Deleted(idx)) => Some(LastLine::Committed(deleted_base + idx)),
            Some(LastLine::Added(idx)) => Some(LastLine::Committed(added_base + idx)),
            other => other,
        };

        self.lines.append(&mut self.deleted);
        self.lines.append(&mut self.added);
    }

    fn mark_no_newline(&mut self) {
        let line = match self.last {
            Some(LastLine::Committed(idx)) => self.lines.get_mut(idx),
            Some(LastLine::Deleted(idx)) => self.deleted.get_mut(idx),
            Some(LastLine::Added(idx)) => self.added.get_mut(idx),
            None => None,
        };
        if let Some(line) = line {
            line.no_newline_at_eof = true;
        }
    }

    fn finish(mut self) -> FilePatch {
        self.flush_changes();

        let path = self.path.unwrap_or_default();
        let old_path = self.old_path.filter(|old| *old != path);
        let content = if self.is_binary {
            PatchContent::Binary
        } else if let Some(lfs) = self.lfs {
            PatchContent::Lfs(lfs)
        } else if self.lines.is_empty() {
            PatchContent::NoChange
        } else {
            PatchContent::Text(TextDiff::new(path.clone(), self.lines))
        };

        FilePatch {
            path,
            old_path,
            status: self.status,
            old_mode: self.old_mode,
            new_mode: self.new_mode,
            old_hash: self.old_hash,
            new_hash: self.new_hash,
            content,
        }
    }
}

fn parse_lfs_size(size: &str) -> Result<u64, ParseError> {
    size.trim()
        .parse()
        .map_err(|_| ParseError::InvalidLfsSize(size.to_string()))
}

fn strip_side_prefix(path: &str) -> &str {
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
}

/// `diff -u` appends a tab and a timestamp to file names
fn trim_timestamp(path: &str) -> &str {
    path.split('\t').next().unwrap_or(path)
}

fn without_first_char(line: &str) -> &str {
    let mut chars = line.chars();
    chars.next();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineKind;

    const MODIFIED: &str = "\
diff --git a/src/lib.rs b/src/lib.rs
index 83db48f..bf269f4 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,5 +1,4 @@
 fn main() {
-    let a = 1;
+    let a = 2;
-    let b = 1;
     println!(\"{}\", a);
 }
";

    fn kinds(diff: &TextDiff) -> Vec<LineKind> {
        diff.lines.iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test_parse_modified_file() {
        let files = parse_patch(MODIFIED).unwrap();
        assert_eq!(files.len(), 1);

        let file = &files[0];
        assert_eq!(file.path, PathBuf::from("src/lib.rs"));
        assert_eq!(file.old_path, None);
        assert_eq!(file.status, FileStatus::Modified);
        assert_eq!(file.old_hash.as_deref(), Some("83db48f"));
        assert_eq!(file.new_hash.as_deref(), Some("bf269f4"));
        assert_eq!(file.insertions(), 1);
        assert_eq!(file.deletions(), 2);

        let diff = file.text().unwrap();
        assert_eq!(
            kinds(diff),
            vec![
                LineKind::Header,
                LineKind::Context,
                LineKind::Deleted,
                LineKind::Deleted,
                LineKind::Added,
                LineKind::Context,
                LineKind::Context,
            ]
        );
        // Deletions are grouped ahead of additions with their own numbering
        assert_eq!(diff.lines[2].content, "    let a = 1;");
        assert_eq!(diff.lines[2].old_line, Some(2));
        assert_eq!(diff.lines[3].content, "    let b = 1;");
        assert_eq!(diff.lines[3].old_line, Some(3));
        assert_eq!(diff.lines[4].new_line, Some(2));
        assert_eq!(diff.lines[5].old_line, Some(4));
        assert_eq!(diff.lines[5].new_line, Some(3));
        assert_eq!(diff.max_line_number, 5);
        assert_eq!(diff.lines[6].origin, Some(6));
    }

    #[test]
    fn test_parse_multiple_files() {
        let patch = "\
diff --git a/a.txt b/a.txt
new file mode 100644
index 0000000..e69de29
--- /dev/null
+++ b/a.txt
@@ -0,0 +1,2 @@
+one
+two
diff --git a/b.txt b/b.txt
deleted file mode 100644
index e69de29..0000000
--- a/b.txt
+++ /dev/null
@@ -1 +0,0 @@
-gone
diff --git a/old.txt b/new.txt
similarity index 90%
rename from old.txt
rename to new.txt
";
        let files = parse_patch(patch).unwrap();
        assert_eq!(files.len(), 3);

        assert_eq!(files[0].status, FileStatus::Added);
        assert_eq!(files[0].new_mode.as_deref(), Some("100644"));
        assert_eq!(files[0].insertions(), 2);

        assert_eq!(files[1].status, FileStatus::Deleted);
        assert_eq!(files[1].path, PathBuf::from("b.txt"));
        assert_eq!(files[1].deletions(), 1);

        assert_eq!(files[2].status, FileStatus::Renamed);
        assert_eq!(files[2].path, PathBuf::from("new.txt"));
        assert_eq!(files[2].old_path, Some(PathBuf::from("old.txt")));
        assert_eq!(files[2].content, PatchContent::NoChange);
    }

    #[test]
    fn test_parse_plain_unified_diff() {
        let patch = "\
--- left.txt\t2024-01-01 00:00:00
+++ right.txt\t2024-01-02 00:00:00
@@ -3,2 +3,3 @@
 keep

+new
";
        let files = parse_patch(patch).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("right.txt"));

        let diff = files[0].text().unwrap();
        assert_eq!(
            kinds(diff),
            vec![LineKind::Header, LineKind::Context, LineKind::Context, LineKind::Added]
        );
        assert_eq!(diff.lines[2].content, "");
        assert_eq!(diff.lines[2].old_line, Some(4));
        assert_eq!(diff.lines[3].new_line, Some(5));
    }

    #[test]
    fn test_no_newline_marker() {
        let patch = "\
diff --git a/x b/x
--- a/x
+++ b/x
@@ -1 +1 @@
-old
\\ No newline at end of file
+new
\\ No newline at end of file
";
        let files = parse_patch(patch).unwrap();
        let diff = files[0].text().unwrap();
        assert_eq!(diff.lines[1].kind, LineKind::Deleted);
        assert!(diff.lines[1].no_newline_at_eof);
        assert_eq!(diff.lines[2].kind, LineKind::Added);
        assert!(diff.lines[2].no_newline_at_eof);
    }

    #[test]
    fn test_binary_file() {
        let patch = "\
diff --git a/logo.png b/logo.png
index 83db48f..bf269f4 100644
Binary files a/logo.png and b/logo.png differ
";
        let files = parse_patch(patch).unwrap();
        assert_eq!(files[0].content, PatchContent::Binary);
        assert_eq!(files[0].text(), None);
    }

    #[test]
    fn test_lfs_pointer_change() {
        let patch = "\
diff --git a/big.bin b/big.bin
index 83db48f..bf269f4 100644
--- a/big.bin
+++ b/big.bin
@@ -1,3 +1,3 @@
 version https://git-lfs.github.com/spec/v1
-oid sha256:aaaa
+oid sha256:bbbb
-size 10
+size 20
";
        let files = parse_patch(patch).unwrap();
        let PatchContent::Lfs(lfs) = &files[0].content else {
            panic!("expected LFS content");
        };
        assert_eq!(lfs.old, LfsObject { oid: "aaaa".into(), size: 10 });
        assert_eq!(lfs.new, LfsObject { oid: "bbbb".into(), size: 20 });
    }

    #[test]
    fn test_invalid_lfs_size() {
        let patch = "\
diff --git a/big.bin b/big.bin
--- a/big.bin
+++ b/big.bin
@@ -1,3 +1,3 @@
 version https://git-lfs.github.com/spec/v1
-oid sha256:aaaa
+oid sha256:bbbb
-size ten
+size 20
";
        assert_eq!(
            parse_patch(patch),
            Err(ParseError::InvalidLfsSize("ten".to_string()))
        );
    }

    #[test]
    fn test_invalid_hunk_header() {
        let patch = "--- a/x\n+++ b/x\n@@ -99999999999 +1 @@\n";
        assert_eq!(
            parse_patch(patch),
            Err(ParseError::InvalidHunkHeader(
                "@@ -99999999999 +1 @@".to_string()
            ))
        );
    }

    #[test]
    fn test_hunk_header_overflow() {
        // The second body line would be numbered past u32::MAX
        let patch = "--- a/x\n+++ b/x\n@@ -4294967295 +1 @@\n a\n b\n";
        assert_eq!(
            parse_patch(patch),
            Err(ParseError::InvalidHunkHeader(
                "@@ -4294967295 +1 @@".to_string()
            ))
        );

        let patch = "--- a/x\n+++ b/x\n@@ -1,4294967295 +1 @@\n a\n";
        assert!(matches!(
            parse_patch(patch),
            Err(ParseError::InvalidHunkHeader(_))
        ));

        // The largest line number that still fits is fine
        let patch = "--- a/x\n+++ b/x\n@@ -4294967294 +1 @@\n a\n";
        let files = parse_patch(patch).unwrap();
        let diff = files[0].text().unwrap();
        assert_eq!(diff.lines[1].old_line, Some(4294967294));
    }

    #[test]
    fn test_commit_header_is_skipped() {
        let patch = "\
commit 0123456789abcdef0123456789abcdef01234567
Author: Dev <dev@example.com>
Date:   Mon Jan 1 00:00:00 2024 +0000

    Tweak x

diff --git a/x.txt b/x.txt
index 83db48f..bf269f4 100644
--- a/x.txt
+++ b/x.txt
@@ -1,2 +1,2 @@
 a
-b
+B
";
        let files = parse_patch(patch).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("x.txt"));
        assert_eq!(files[0].deletions(), 1);
        assert_eq!(files[0].insertions(), 1);
    }

    #[test]
    fn test_format_patch_trailer_ends_hunk() {
        let patch = "\
From 0123456789abcdef0123456789abcdef01234567 Mon Sep 17 00:00:00 2001
From: Dev <dev@example.com>
Subject: [PATCH] Tweak x

---
 x.txt | 2 +-
 1 file changed, 1 insertion(+), 1 deletion(-)

diff --git a/x.txt b/x.txt
index 83db48f..bf269f4 100644
--- a/x.txt
+++ b/x.txt
@@ -1,2 +1,2 @@
 a
-b
+B
-- 
2.43.0

";
        let files = parse_patch(patch).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].deletions(), 1);

        let diff = files[0].text().unwrap();
        assert_eq!(
            kinds(diff),
            vec![LineKind::Header, LineKind::Context, LineKind::Deleted, LineKind::Added]
        );
        assert_eq!(diff.lines[3].content, "B");
        assert_eq!(diff.lines[3].new_line, Some(2));
    }

    #[test]
    fn test_hunk_counts_bound_each_hunk() {
        // Counts default to one; the stray line after the first hunk is not body
        let patch = "\
--- a/x
+++ b/x
@@ -1 +1 @@
-old
+new
 stray
@@ -5,0 +6,1 @@
+tail
";
        let files = parse_patch(patch).unwrap();
        let diff = files[0].text().unwrap();
        assert_eq!(
            kinds(diff),
            vec![
                LineKind::Header,
                LineKind::Deleted,
                LineKind::Added,
                LineKind::Header,
                LineKind::Added,
            ]
        );
        assert_eq!(diff.lines[4].new_line, Some(6));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_patch("").unwrap(), Vec::new());
        assert_eq!(parse_patch("just some text\n").unwrap(), Vec::new());
    }
}
