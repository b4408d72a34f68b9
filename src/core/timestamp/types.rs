//! Types for the timestamp module.

use crate::core::scanner::SourceFile;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Where a timestamp came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampSource {
    /// Parsed from a `yyyy-MM-dd HH.mm.ss` file name
    FileName,
    /// EXIF `DateTimeOriginal`
    EmbeddedMetadata,
    /// Filesystem last-modified time
    FileSystem,
}

impl std::fmt::Display for TimestampSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampSource::FileName => write!(f, "file name"),
            TimestampSource::EmbeddedMetadata => write!(f, "EXIF metadata"),
            TimestampSource::FileSystem => write!(f, "file attributes"),
        }
    }
}

/// A resolved capture time with its provenance.
///
/// `at` is a wall-clock value; see the module docs for which zone each
/// source is read in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTimestamp {
    pub at: NaiveDateTime,
    pub source: TimestampSource,
    /// Key of the device profile in effect when this was resolved
    pub profile: Option<&'static str>,
}

/// A source file paired with its resolved timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampedFile {
    pub source: SourceFile,
    pub timestamp: ResolvedTimestamp,
}

/// Inputs to timestamp resolution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Try EXIF before falling back to the file's mtime
    pub use_embedded_metadata: bool,
    /// Signed clock correction in minutes
    pub time_offset_minutes: i32,
    /// Name of a device profile whose settings override the two above
    pub device_profile: Option<String>,
}

/// Counters produced by the resolution stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveStats {
    pub from_file_name: usize,
    pub from_embedded_metadata: usize,
    pub from_file_system: usize,
    /// Files resolved while a device profile was active
    pub profile_adjusted: usize,
}

impl ResolveStats {
    pub fn record(&mut self, timestamp: &ResolvedTimestamp) {
        match timestamp.source {
            TimestampSource::FileName => self.from_file_name += 1,
            TimestampSource::EmbeddedMetadata => self.from_embedded_metadata += 1,
            TimestampSource::FileSystem => self.from_file_system += 1,
        }
        if timestamp.profile.is_some() {
            self.profile_adjusted += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.from_file_name + self.from_embedded_metadata + self.from_file_system
    }
}
