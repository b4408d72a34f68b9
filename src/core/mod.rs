//! # Core Module
//!
//! The organizing engine, independent of any UI.
//!
//! ## Modules
//! - `scanner` - Lists input files
//! - `metadata` - Reads EXIF capture times
//! - `timestamp` - Resolves one timestamp per file
//! - `dedup` - Drops byte-identical files
//! - `organize` - Plans target paths and copies files
//! - `reporter` - Renders the run report
//! - `pipeline` - Orchestrates the full workflow

pub mod dedup;
pub mod metadata;
pub mod organize;
pub mod pipeline;
pub mod reporter;
pub mod scanner;
pub mod timestamp;

// Re-export commonly used types
pub use dedup::{Deduplicator, Fingerprint};
pub use organize::{PlacementPlan, PlacementPlanner};
pub use reporter::RunReport;
pub use scanner::SourceFile;
pub use timestamp::{TimestampResolver, TimestampedFile};
