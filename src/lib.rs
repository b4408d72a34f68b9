//! # Photo Organizer
//!
//! Copies a dump of photos and videos into a dated folder tree.
//!
//! Every file gets one timestamp (from its name, its EXIF data or its
//! modification time), byte-identical files are copied once, and each copy
//! lands in `year/year_MMMonth/` under a name built from that timestamp.
//! The input directory is only ever read.
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - Resolution, deduplication and placement
//! - `events` - Event-driven progress reporting
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{OrganizerError, Result};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the library
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over
/// `info`. Logs go to stderr so stdout only carries the report.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed (tests, embedding apps)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
