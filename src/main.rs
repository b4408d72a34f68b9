//! # photo-organize CLI
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! photo-organize organize ~/Dump -o ~/Sorted
//! photo-organize organize ~/Dump --use-exif --profile nexus5x --format json
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
