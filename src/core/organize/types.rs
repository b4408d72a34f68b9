//! Types for the organize module.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Where one file goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementPlan {
    /// e.g. `out/2023/2023_11November`
    pub target_directory: PathBuf,
    /// e.g. `2023-11-01_00-00-00_1.jpg`
    pub target_file_name: String,
}

impl PlacementPlan {
    pub fn target_path(&self) -> PathBuf {
        self.target_directory.join(&self.target_file_name)
    }
}

/// A file that could not be placed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Counters produced by the placement stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacementStats {
    pub files_copied: usize,
    pub folders_created: usize,
    /// Copies whose name needed a `_N` suffix
    pub renamed_on_collision: usize,
    /// Copied files per extension (case preserved, "" for none)
    pub extensions: BTreeMap<String, usize>,
    pub failures: Vec<PlacementFailure>,
}

impl PlacementStats {
    pub(crate) fn record_copy(&mut self, extension: Option<&str>) {
        self.files_copied += 1;
        *self
            .extensions
            .entry(extension.unwrap_or_default().to_string())
            .or_default() += 1;
    }
}
