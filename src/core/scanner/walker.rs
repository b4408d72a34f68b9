//! Directory walking implementation using walkdir.

use super::{FileScanner, ScanResult, SourceFile};
use crate::error::ScanError;
use crate::events::{Event, EventSender, ScanEvent};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to descend into symlinked directories
    pub follow_symlinks: bool,
    /// Subtree to leave out (the output root, when it sits inside the input)
    pub exclude: Option<PathBuf>,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        self.config
            .exclude
            .as_deref()
            .is_some_and(|excluded| entry.path() == excluded)
    }

    /// Regular files, plus symlinks that resolve to regular files
    fn is_regular_file(entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        if file_type.is_file() {
            return true;
        }
        file_type.is_symlink()
            && fs::metadata(entry.path())
                .map(|m| m.is_file())
                .unwrap_or(false)
    }
}

impl FileScanner for WalkDirScanner {
    fn scan_with_events(&self, root: &Path, events: &EventSender) -> ScanResult {
        events.send(Event::Scan(ScanEvent::Started {
            root: root.to_path_buf(),
        }));

        let mut files = Vec::new();
        let mut errors = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    if !Self::is_regular_file(&entry) {
                        continue;
                    }

                    match SourceFile::from_path(entry.path()) {
                        Ok(file) => {
                            debug!(path = %file.path.display(), size = file.size, "Found file");
                            files.push(file);
                        }
                        Err(e) => {
                            let error = ScanError::ReadDirectory {
                                path: entry.path().to_path_buf(),
                                source: e,
                            };
                            warn!("{}", error);
                            events.send(Event::Scan(ScanEvent::Error {
                                path: entry.path().to_path_buf(),
                                message: error.to_string(),
                            }));
                            errors.push(error);
                        }
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadDirectory {
                            path: path.clone(),
                            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
                        }
                    };

                    warn!("{}", error);
                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));
                    errors.push(error);
                }
            }
        }

        info!("Number of files to organize: {}", files.len());
        events.send(Event::Scan(ScanEvent::Completed {
            total_files: files.len(),
        }));

        ScanResult { files, errors }
    }
}
