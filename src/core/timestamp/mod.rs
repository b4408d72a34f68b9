//! # Timestamp Module
//!
//! Picks one capture time per file from competing, unreliable sources.
//!
//! ## Resolution order
//! 1. **File name** - `yyyy-MM-dd HH.mm.ss.ext` is trusted as-is, no offset
//! 2. **EXIF** - `DateTimeOriginal`, only when enabled (or forced by a profile)
//! 3. **File attributes** - last-modified time, always available
//!
//! The time offset (minutes) is added to results from 2 and 3.
//!
//! ## Time zones
//! EXIF values are read in their recorded offset, or as UTC when none is
//! recorded; file attributes are read in the local system zone. The mix is
//! historical and folder bucketing depends on it, so it is kept as is.

mod profile;
mod strategy;
mod types;

pub use profile::{all_profiles, profile_by_name, DeviceProfile};
pub use strategy::ResolutionStrategy;
pub use types::*;

use crate::core::scanner::SourceFile;
use crate::events::{Event, EventSender, ResolveEvent, StageProgress};
use chrono::{Duration, NaiveDateTime};
use tracing::{debug, info, warn};

/// Resolves timestamps for a run, with profile overrides already applied
#[derive(Debug, Clone)]
pub struct TimestampResolver {
    strategies: Vec<ResolutionStrategy>,
    time_offset_minutes: i32,
    profile: Option<&'static str>,
}

impl TimestampResolver {
    /// Build a resolver, letting a known device profile override the
    /// EXIF switch and the photo offset. Unknown profile names are ignored.
    pub fn new(config: &ResolutionConfig) -> Self {
        let mut use_embedded_metadata = config.use_embedded_metadata;
        let mut time_offset_minutes = config.time_offset_minutes;
        let mut profile = None;

        if let Some(name) = config.device_profile.as_deref() {
            match profile_by_name(name) {
                Some((key, device)) => {
                    info!(
                        "Profile found for device {}. 'use EXIF' and 'time offset' will be overridden: {:?}",
                        key, device
                    );
                    use_embedded_metadata = device.uses_embedded_metadata;
                    time_offset_minutes = device.photo_offset_minutes;
                    profile = Some(key);
                }
                None => warn!("No device profile named '{}', using explicit settings", name),
            }
        }

        let mut strategies = vec![ResolutionStrategy::FileName];
        if use_embedded_metadata {
            strategies.push(ResolutionStrategy::EmbeddedMetadata);
        }
        strategies.push(ResolutionStrategy::FileSystem);

        Self {
            strategies,
            time_offset_minutes,
            profile,
        }
    }

    /// Sources this resolver tries, in order
    pub fn strategies(&self) -> &[ResolutionStrategy] {
        &self.strategies
    }

    pub fn time_offset_minutes(&self) -> i32 {
        self.time_offset_minutes
    }

    pub fn profile(&self) -> Option<&'static str> {
        self.profile
    }

    /// Resolve one file. Never fails: file attributes are always there.
    pub fn resolve(&self, file: SourceFile) -> TimestampedFile {
        let (strategy, at) = self
            .strategies
            .iter()
            .find_map(|strategy| strategy.attempt(&file).map(|at| (*strategy, at)))
            .unwrap_or_else(|| {
                (
                    ResolutionStrategy::FileSystem,
                    strategy::from_file_system(&file),
                )
            });

        let at = if strategy.applies_offset() {
            apply_offset(at, self.time_offset_minutes)
        } else {
            at
        };

        debug!(path = %file.path.display(), %at, source = %strategy.source(), "Resolved timestamp");

        TimestampedFile {
            source: file,
            timestamp: ResolvedTimestamp {
                at,
                source: strategy.source(),
                profile: self.profile,
            },
        }
    }

    /// Resolve every file, preserving order
    pub fn resolve_all(
        &self,
        files: Vec<SourceFile>,
        events: &EventSender,
    ) -> (Vec<TimestampedFile>, ResolveStats) {
        let total = files.len();
        let mut stats = ResolveStats::default();
        let mut resolved = Vec::with_capacity(total);

        for (i, file) in files.into_iter().enumerate() {
            events.send(Event::Resolve(ResolveEvent::Progress(StageProgress {
                completed: i + 1,
                total,
                current_path: file.path.clone(),
            })));

            let timestamped = self.resolve(file);
            stats.record(&timestamped.timestamp);
            resolved.push(timestamped);
        }

        (resolved, stats)
    }
}

/// Shift by a signed number of minutes; zero is the identity
pub fn apply_offset(at: NaiveDateTime, minutes: i32) -> NaiveDateTime {
    if minutes == 0 {
        return at;
    }
    match at.checked_add_signed(Duration::minutes(i64::from(minutes))) {
        Some(shifted) => {
            debug!("Applied time offset of {} minutes: {} -> {}", minutes, at, shifted);
            shifted
        }
        None => {
            warn!("Time offset of {} minutes overflows {}, leaving it unshifted", minutes, at);
            at
        }
    }
}
