//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the organizer pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Listing phase events
    Scan(ScanEvent),
    /// Timestamp resolution events
    Resolve(ResolveEvent),
    /// Deduplication events
    Dedup(DedupEvent),
    /// Placement (copy) events
    Place(PlaceEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events during the listing phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Listing has started
    Started { root: PathBuf },
    /// An entry could not be read but listing continues
    Error { path: PathBuf, message: String },
    /// Listing completed
    Completed { total_files: usize },
}

/// Events during timestamp resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResolveEvent {
    Progress(StageProgress),
}

/// Events during deduplication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DedupEvent {
    Progress(StageProgress),
    /// A file was dropped because its content was already seen
    DuplicateFound { path: PathBuf, original: PathBuf },
}

/// Events during placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlaceEvent {
    Progress(StageProgress),
    FileCopied { from: PathBuf, to: PathBuf },
    Failed { path: PathBuf, message: String },
}

/// Per-file progress within one stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageProgress {
    /// Files handled so far
    pub completed: usize,
    /// Files this stage will handle
    pub total: usize,
    /// File currently being handled
    pub current_path: PathBuf,
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Pipeline completed
    Completed { summary: PipelineSummary },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    Resolving,
    Deduplicating,
    Placing,
}

/// Short summary sent with the completion event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub input_files: usize,
    pub duplicates_skipped: usize,
    pub files_copied: usize,
    pub copy_failures: usize,
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Resolving => write!(f, "Resolving timestamps"),
            PipelinePhase::Deduplicating => write!(f, "Deduplicating"),
            PipelinePhase::Placing => write!(f, "Copying"),
        }
    }
}
