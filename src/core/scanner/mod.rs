//! # Scanner Module
//!
//! Lists every regular file under the input directory.
//!
//! Unlike a photo library browser, the organizer does not filter by
//! extension: whatever sits in the dump gets a timestamp and a place in the
//! output tree. Directories, symlinks to directories and special files are
//! skipped; symlinks to regular files are followed.
//!
//! ## Ordering
//! Entries are yielded sorted by file name within each directory. The
//! order matters downstream: it decides which copy of duplicated content
//! survives and which file claims an unsuffixed name.

mod walker;

pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use crate::events::EventSender;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One input file. Never modified; only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modified time
    pub modified: SystemTime,
}

impl SourceFile {
    /// Build a `SourceFile` by reading the filesystem metadata of `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let metadata = std::fs::metadata(&path)?;
        Ok(Self {
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            path,
        })
    }

    /// Extension exactly as written in the file name (case preserved)
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }

    pub fn file_name(&self) -> &Path {
        self.path
            .file_name()
            .map(Path::new)
            .unwrap_or(self.path.as_path())
    }
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Files found, in listing order
    pub files: Vec<SourceFile>,
    /// Entries that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for input listers
///
/// Implement this trait to feed the pipeline from somewhere else (e.g., tests).
pub trait FileScanner {
    /// List files under `root`, reporting progress via events
    fn scan_with_events(&self, root: &Path, events: &EventSender) -> ScanResult;
}
