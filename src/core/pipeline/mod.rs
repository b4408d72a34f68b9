//! # Pipeline Module
//!
//! Orchestrates a full organizing run.
//!
//! ## Pipeline Stages
//! 1. **Prepare** - Validate configuration, then recreate the output root
//! 2. **Scan** - List every regular file under the input directory
//! 3. **Resolve** - Pick a timestamp per file
//! 4. **Dedupe** - Drop byte-identical files (unless skipped)
//! 5. **Place** - Copy survivors into the dated tree
//!
//! Each stage returns its own metrics; the pipeline merges them into the
//! final [`RunReport`](crate::core::reporter::RunReport).
//!
//! ## Ordering
//! Everything runs on one thread, one file at a time, in listing order.

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig, ValidatedConfig};
