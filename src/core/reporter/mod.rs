//! # Reporter Module
//!
//! Turns the metrics each stage returned into the end-of-run report.
//!
//! Nothing here is global: the pipeline hands over one immutable
//! [`RunReport`] and the reporter renders it, either as a plain table for
//! people or as JSON for scripts.

use crate::core::dedup::DedupStats;
use crate::core::organize::{PlacementFailure, PlacementStats};
use crate::core::timestamp::ResolveStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

const RULE: &str =
    "-----------------------------------------------------------------------------";

/// Everything a run produced, merged from the per-stage metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub input_directory: PathBuf,
    pub output_directory: PathBuf,
    pub input_files: usize,
    /// Entries the listing could not read
    pub scan_errors: usize,
    pub resolve: ResolveStats,
    /// `None` when the duplicate check was skipped
    pub dedup: Option<DedupStats>,
    pub placement: PlacementStats,
    pub duration_ms: u64,
}

impl RunReport {
    pub fn duplicates_skipped(&self) -> usize {
        self.dedup.as_ref().map_or(0, |d| d.duplicates_skipped)
    }

    pub fn files_copied(&self) -> usize {
        self.placement.files_copied
    }

    pub fn extensions(&self) -> &BTreeMap<String, usize> {
        &self.placement.extensions
    }

    pub fn failures(&self) -> &[PlacementFailure] {
        &self.placement.failures
    }

    /// True when every surviving file was copied
    pub fn is_success(&self) -> bool {
        self.placement.failures.is_empty()
    }
}

/// `mm:ss.mmm`
pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms / 1000) % 60;
    let millis = duration_ms % 1000;
    format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
}

/// `JPG: 2, jpg: 5, (none): 1`
pub fn format_extensions(extensions: &BTreeMap<String, usize>) -> String {
    if extensions.is_empty() {
        return "-".to_string();
    }
    extensions
        .iter()
        .map(|(ext, count)| {
            let label = if ext.is_empty() { "(none)" } else { ext.as_str() };
            format!("{}: {}", label, count)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable statistics table
pub fn render_table(report: &RunReport) -> String {
    let mut rows: Vec<(&str, String)> = vec![
        ("Number of input files", report.input_files.to_string()),
        ("Datetimes from file names", report.resolve.from_file_name.to_string()),
        (
            "Datetimes from EXIF metadata",
            report.resolve.from_embedded_metadata.to_string(),
        ),
        (
            "Datetimes from file attributes",
            report.resolve.from_file_system.to_string(),
        ),
    ];

    if report.resolve.profile_adjusted > 0 {
        rows.push((
            "Adjusted by device profile",
            report.resolve.profile_adjusted.to_string(),
        ));
    }

    rows.push((
        "Files with duplicated content",
        match &report.dedup {
            Some(dedup) => dedup.duplicates_skipped.to_string(),
            None => "not checked".to_string(),
        },
    ));
    rows.push(("Files copied", report.placement.files_copied.to_string()));

    if !report.placement.failures.is_empty() {
        rows.push(("Files failed to copy", report.placement.failures.len().to_string()));
    }
    if report.scan_errors > 0 {
        rows.push(("Unreadable entries", report.scan_errors.to_string()));
    }

    rows.push(("Files extensions", format_extensions(&report.placement.extensions)));
    rows.push(("Execution time (mm:ss.ms)", format_duration(report.duration_ms)));

    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  Statistics");
    let _ = writeln!(out, "{}", RULE);
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<33}|  {}", label, value);
    }
    let _ = writeln!(out, "{}", RULE);

    for failure in &report.placement.failures {
        let _ = writeln!(out, "  FAILED {}: {}", failure.path.display(), failure.message);
    }

    out
}

/// Pretty-printed JSON form of the report
pub fn render_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
