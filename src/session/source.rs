use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{FrameError, FrameResult};

/// Where frame sources come from.
///
/// A fetch is a single attempt; retries and user notification are the caller's business.
pub trait FrameSource {
    /// Bytes of the frame source at catalog path `src`.
    fn fetch(&self, src: &str) -> FrameResult<Vec<u8>>;
}

/// Frame sources read from a directory.
#[derive(Debug, Clone)]
pub struct FsFrameSource {
    root: PathBuf,
}

impl FsFrameSource {
    /// Resolve catalog paths below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FrameSource for FsFrameSource {
    fn fetch(&self, src: &str) -> FrameResult<Vec<u8>> {
        let rel = normalize_rel_path(src)?;
        let path = self.root.join(&rel);
        std::fs::read(&path)
            .map_err(|e| FrameError::fetch(format!("read frame '{}': {e}", path.display())))
    }
}

/// In-memory frame sources keyed by catalog path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFrameSource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryFrameSource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the bytes served for `src`.
    pub fn insert(&mut self, src: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(src.into(), bytes.into());
    }

    /// Builder form of [`Self::insert`].
    pub fn with(mut self, src: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(src, bytes);
        self
    }
}

impl FrameSource for MemoryFrameSource {
    fn fetch(&self, src: &str) -> FrameResult<Vec<u8>> {
        self.entries
            .get(src)
            .cloned()
            .ok_or_else(|| FrameError::fetch(format!("no frame source '{src}'")))
    }
}

/// Catalog path made safe to join below a source root.
///
/// Backslashes count as separators and `.` or empty segments are dropped. Absolute paths, drive
/// prefixes and `..` segments are refused, as is a path with no segments left.
pub(crate) fn normalize_rel_path(src: &str) -> FrameResult<String> {
    let unified = src.replace('\\', "/");
    let rooted = unified.starts_with('/')
        || unified.split('/').next().is_some_and(|first| first.ends_with(':'));
    if rooted {
        return Err(FrameError::validation(format!("frame path '{src}' is absolute")));
    }

    let segments = unified
        .split('/')
        .filter(|seg| !matches!(*seg, "" | "."))
        .map(|seg| match seg {
            ".." => Err(FrameError::validation(format!(
                "frame path '{src}' escapes the frame root"
            ))),
            seg => Ok(seg),
        })
        .collect::<FrameResult<Vec<_>>>()?;

    if segments.is_empty() {
        return Err(FrameError::validation(format!("frame path '{src}' names no file")));
    }
    Ok(segments.join("/"))
}
