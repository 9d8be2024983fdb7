//! Segment files: ids, loading, and line cleanup.
//!
//! A segment is one map tile stored as `segment-<N>.txt` (N = 1..=9) inside
//! the segments directory.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Identifier of a segment file, always in `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(u8);

impl SegmentId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    /// Returns `None` if `n` is outside `1..=9`.
    pub fn new(n: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&n).then_some(Self(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All nine ids in ascending order.
    pub fn all() -> impl Iterator<Item = SegmentId> {
        (Self::MIN..=Self::MAX).map(SegmentId)
    }

    /// File name of this segment inside the segments directory.
    pub fn file_name(self) -> String {
        format!("segment-{}.txt", self.0)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A segment file could not be found or read.
#[derive(Debug)]
pub struct SegmentLoadError {
    pub id: SegmentId,
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for SegmentLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot read segment {} at {}",
            self.id,
            self.path.display()
        )
    }
}

impl std::error::Error for SegmentLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Raw lines of one segment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: SegmentId,
    pub lines: Vec<String>,
}

impl Segment {
    /// Parses preview text: trailing blank lines are dropped, interior ones kept.
    pub fn from_preview_text(id: SegmentId, text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        trim_trailing_blank(&mut lines);
        Self { id, lines }
    }

    /// Parses map text: every blank line and every `;` comment line is dropped.
    pub fn from_map_text(id: SegmentId, text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.replace('\r', ""))
            .filter(|line| !line.is_empty() && !line.trim_start().starts_with(';'))
            .collect();
        Self { id, lines }
    }
}

/// Which parser to apply to segment file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Preview,
    Map,
}

/// Removes trailing lines that are empty or whitespace-only.
pub fn trim_trailing_blank(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
}

/// Path of a segment file inside `dir`.
pub fn segment_path(dir: &Path, id: SegmentId) -> PathBuf {
    dir.join(id.file_name())
}

fn read_segment_text(dir: &Path, id: SegmentId) -> Result<String, SegmentLoadError> {
    let path = segment_path(dir, id);
    // read_to_string owns the handle for the duration of the call only
    fs::read_to_string(&path).map_err(|source| SegmentLoadError { id, path, source })
}

/// Loads one segment for previewing.
///
/// # Errors
/// Returns [`SegmentLoadError`] if the file is missing, unreadable, or not UTF-8.
pub fn load_segment(dir: &Path, id: SegmentId) -> Result<Segment, SegmentLoadError> {
    load_segment_with(dir, id, ParseMode::Preview)
}

/// Loads one segment with the given parse mode.
///
/// # Errors
/// Returns [`SegmentLoadError`] if the file is missing, unreadable, or not UTF-8.
pub fn load_segment_with(
    dir: &Path,
    id: SegmentId,
    mode: ParseMode,
) -> Result<Segment, SegmentLoadError> {
    let text = read_segment_text(dir, id)?;
    let segment = match mode {
        ParseMode::Preview => Segment::from_preview_text(id, &text),
        ParseMode::Map => Segment::from_map_text(id, &text),
    };
    tracing::debug!(
        segment = id.get(),
        lines = segment.lines.len(),
        ?mode,
        "loaded segment"
    );
    Ok(segment)
}

/// Loads all nine segments in id order, stopping at the first failure.
///
/// # Errors
/// Returns the [`SegmentLoadError`] of the first segment that fails to load.
pub fn load_all(dir: &Path) -> Result<BTreeMap<SegmentId, Segment>, SegmentLoadError> {
    SegmentId::all()
        .map(|id| load_segment(dir, id).map(|seg| (id, seg)))
        .collect()
}
