//! The individual timestamp sources, tried in order by the resolver.

use super::types::TimestampSource;
use crate::core::metadata::read_capture_time;
use crate::core::scanner::SourceFile;
use chrono::{DateTime, Local, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// File names like `2023-05-01 10.30.00.jpg`
const FILE_NAME_FORMAT: &str = "%Y-%m-%d %H.%M.%S";

fn file_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}\.\d{2}\.\d{2}$").expect("file name pattern is valid")
    })
}

/// One way of obtaining a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    FileName,
    EmbeddedMetadata,
    FileSystem,
}

impl ResolutionStrategy {
    /// Try this source. `None` means "try the next one".
    pub fn attempt(&self, file: &SourceFile) -> Option<NaiveDateTime> {
        match self {
            ResolutionStrategy::FileName => from_file_name(file),
            ResolutionStrategy::EmbeddedMetadata => from_embedded_metadata(file),
            ResolutionStrategy::FileSystem => Some(from_file_system(file)),
        }
    }

    pub fn source(&self) -> TimestampSource {
        match self {
            ResolutionStrategy::FileName => TimestampSource::FileName,
            ResolutionStrategy::EmbeddedMetadata => TimestampSource::EmbeddedMetadata,
            ResolutionStrategy::FileSystem => TimestampSource::FileSystem,
        }
    }

    /// File-name timestamps are taken as already correct
    pub fn applies_offset(&self) -> bool {
        !matches!(self, ResolutionStrategy::FileName)
    }
}

pub(crate) fn from_file_name(file: &SourceFile) -> Option<NaiveDateTime> {
    let stem = file.path.file_stem()?.to_str()?;
    if !file_name_pattern().is_match(stem) {
        return None;
    }
    let at = NaiveDateTime::parse_from_str(stem, FILE_NAME_FORMAT).ok()?;
    debug!(path = %file.path.display(), %at, "Timestamp obtained from file name");
    Some(at)
}

fn from_embedded_metadata(file: &SourceFile) -> Option<NaiveDateTime> {
    debug!(path = %file.path.display(), "Reading EXIF timestamp");
    match read_capture_time(&file.path) {
        Ok(taken) => {
            debug!(
                path = %file.path.display(),
                offset = %taken.offset(),
                "EXIF timestamp {}",
                taken.naive_local()
            );
            Some(taken.naive_local())
        }
        Err(miss) => {
            warn!("Cannot obtain EXIF date for [{}]: {}", file.path.display(), miss);
            None
        }
    }
}

/// The mtime captured at listing, read in the local system zone
pub(crate) fn from_file_system(file: &SourceFile) -> NaiveDateTime {
    let at = DateTime::<Local>::from(file.modified).naive_local();
    debug!(path = %file.path.display(), %at, "Last modified time obtained from file attributes");
    at
}
