//! # Dedup Module
//!
//! Drops files whose bytes match a file seen earlier in the run.
//!
//! Each file is read once in full and fingerprinted. The first file with a
//! given fingerprint is kept; every later one is skipped. Input order is
//! preserved, so the result depends on listing order, and running the
//! stage again on its own output changes nothing.
//!
//! Zero-byte files all share one fingerprint: only the first survives.

mod fingerprint;

pub use fingerprint::Fingerprint;

use crate::core::timestamp::TimestampedFile;
use crate::events::{DedupEvent, Event, EventSender, StageProgress};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Counters produced by the deduplication stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupStats {
    /// Files dropped because their content was already seen
    pub duplicates_skipped: usize,
    /// Files that could not be read for fingerprinting (kept, unregistered)
    pub fingerprint_failures: usize,
}

/// First-seen file per fingerprint, in registration order.
///
/// Additive only: an entry is never replaced or removed.
#[derive(Debug, Default)]
pub struct DeduplicationRegistry {
    entries: Vec<(Fingerprint, TimestampedFile)>,
    index: HashMap<Fingerprint, usize>,
}

impl DeduplicationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `file` under `fingerprint`.
    ///
    /// Returns the already-registered file when the fingerprint is taken;
    /// the registry is left unchanged in that case.
    pub fn register(
        &mut self,
        fingerprint: Fingerprint,
        file: &TimestampedFile,
    ) -> Result<(), &TimestampedFile> {
        if let Some(&existing) = self.index.get(&fingerprint) {
            return Err(&self.entries[existing].1);
        }
        self.index.insert(fingerprint, self.entries.len());
        self.entries.push((fingerprint, file.clone()));
        Ok(())
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&TimestampedFile> {
        self.index.get(fingerprint).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered files in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &TimestampedFile)> {
        self.entries.iter().map(|(fp, file)| (fp, file))
    }
}

/// Filters a sequence of files down to one per distinct content
pub struct Deduplicator {
    fingerprint: fn(&Path) -> std::io::Result<Fingerprint>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self {
            fingerprint: Fingerprint::of_file,
        }
    }

    /// Use a different fingerprint function (tests)
    pub fn with_fingerprint(fingerprint: fn(&Path) -> std::io::Result<Fingerprint>) -> Self {
        Self { fingerprint }
    }

    /// Deduplicate without progress reporting
    pub fn dedupe(&self, files: Vec<TimestampedFile>) -> (Vec<TimestampedFile>, DedupStats) {
        self.dedupe_with_events(files, &crate::events::null_sender())
    }

    /// Keep the first file per fingerprint, in input order
    pub fn dedupe_with_events(
        &self,
        files: Vec<TimestampedFile>,
        events: &EventSender,
    ) -> (Vec<TimestampedFile>, DedupStats) {
        info!("Searching for files with duplicated content");

        let total = files.len();
        let mut registry = DeduplicationRegistry::new();
        let mut stats = DedupStats::default();
        let mut survivors = Vec::with_capacity(total);

        for (i, file) in files.into_iter().enumerate() {
            let path = &file.source.path;
            events.send(Event::Dedup(DedupEvent::Progress(StageProgress {
                completed: i + 1,
                total,
                current_path: path.clone(),
            })));

            let fingerprint = match (self.fingerprint)(path) {
                Ok(fp) => fp,
                Err(e) => {
                    warn!(
                        "Cannot read [{}] to check for duplicates, keeping it: {}",
                        path.display(),
                        e
                    );
                    stats.fingerprint_failures += 1;
                    survivors.push(file);
                    continue;
                }
            };
            debug!("Fingerprint [{}] for a file [{}]", fingerprint, path.display());

            match registry.register(fingerprint, &file) {
                Ok(()) => survivors.push(file),
                Err(original) => {
                    warn!(
                        "Duplicate found. Files [{}] and [{}] have the same fingerprint [{}]. Duplicate will be skipped",
                        path.display(),
                        original.source.path.display(),
                        fingerprint
                    );
                    events.send(Event::Dedup(DedupEvent::DuplicateFound {
                        path: path.clone(),
                        original: original.source.path.clone(),
                    }));
                    stats.duplicates_skipped += 1;
                }
            }
        }

        info!(
            "{} unique files, {} duplicates skipped",
            registry.len(),
            stats.duplicates_skipped
        );
        (survivors, stats)
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new()
    }
}
