//! # Error Module
//!
//! Error types for the photo organizer.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Fatal vs. per-file** - only configuration problems stop a run;
//!   placement failures are collected and reported at the end

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to prepare output directory {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Problems with the run configuration, detected before anything is touched
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Input directory not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Input path is not a directory: {path}")]
    InputNotDirectory { path: PathBuf },

    #[error(
        "Output directory {output} would overwrite the input directory {input}. \
         Choose an output location outside the photos being organized."
    )]
    OutputOverlapsInput { input: PathBuf, output: PathBuf },

    #[error(
        "Output directory {output} already exists inside the input directory {input}. \
         It would be emptied before its files are organized; pick a new or outside location."
    )]
    OutputInsideInput { input: PathBuf, output: PathBuf },

    #[error("Unknown locale for month names: {name} (expected something like en_US or pl_PL)")]
    UnknownLocale { name: String },
}

/// Entries the listing could not read. Collected per entry, never fatal.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-file failures while copying into the output tree
#[derive(Error, Debug)]
pub enum PlacementError {
    #[error("Failed to create {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, OrganizerError>;
