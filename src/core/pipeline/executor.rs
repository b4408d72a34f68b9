//! Pipeline execution implementation.

use crate::core::dedup::Deduplicator;
use crate::core::organize::{parse_locale, PlacementExecutor, PlacementPlanner, DEFAULT_MONTH_LOCALE};
use crate::core::reporter::RunReport;
use crate::core::scanner::{FileScanner, ScanConfig, WalkDirScanner};
use crate::core::timestamp::{ResolutionConfig, TimestampResolver};
use crate::error::{ConfigError, OrganizerError, Result};
use crate::events::{null_sender, Event, EventSender, PipelineEvent, PipelinePhase, PipelineSummary};
use chrono::Locale;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the files to organize (read only)
    pub input: PathBuf,
    /// Directory to (re)create and fill
    pub output: PathBuf,
    /// Timestamp resolution settings
    pub resolution: ResolutionConfig,
    /// Copy every file, even byte-identical ones
    pub skip_duplicate_check: bool,
    /// Locale for month folder names, e.g. `en_US`
    pub month_locale: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from("output"),
            resolution: ResolutionConfig::default(),
            skip_duplicate_check: false,
            month_locale: DEFAULT_MONTH_LOCALE.to_string(),
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Set the directory to organize
    pub fn input(mut self, input: impl Into<PathBuf>) -> Self {
        self.config.input = input.into();
        self
    }

    /// Set the output directory
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.config.output = output.into();
        self
    }

    /// Read EXIF capture dates before falling back to file attributes
    pub fn use_embedded_metadata(mut self, enabled: bool) -> Self {
        self.config.resolution.use_embedded_metadata = enabled;
        self
    }

    /// Shift resolved timestamps by this many minutes
    pub fn time_offset_minutes(mut self, minutes: i32) -> Self {
        self.config.resolution.time_offset_minutes = minutes;
        self
    }

    /// Apply a named device profile
    pub fn device_profile(mut self, name: Option<String>) -> Self {
        self.config.resolution.device_profile = name;
        self
    }

    /// Bypass the deduplication stage
    pub fn skip_duplicate_check(mut self, skip: bool) -> Self {
        self.config.skip_duplicate_check = skip;
        self
    }

    /// Set the locale for month folder names
    pub fn month_locale(mut self, locale: impl Into<String>) -> Self {
        self.config.month_locale = locale.into();
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Paths and settings checked before anything is touched
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Canonical input directory
    pub input: PathBuf,
    /// Absolute output directory
    pub output: PathBuf,
    pub locale: Locale,
}

/// The organizing pipeline: list, resolve, deduplicate, place
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Check the configuration without touching the filesystem
    pub fn validate(&self) -> std::result::Result<ValidatedConfig, ConfigError> {
        let input = &self.config.input;
        if !input.exists() {
            return Err(ConfigError::InputNotFound {
                path: input.clone(),
            });
        }
        if !input.is_dir() {
            return Err(ConfigError::InputNotDirectory {
                path: input.clone(),
            });
        }
        let input = fs::canonicalize(input).map_err(|_| ConfigError::InputNotFound {
            path: input.clone(),
        })?;

        let output = absolute_path(&self.config.output);
        if input.starts_with(&output) {
            return Err(ConfigError::OutputOverlapsInput { input, output });
        }
        // Preparing the output empties it; an existing subtree of the input
        // would lose its photos before they are listed.
        if output.starts_with(&input) && fs::symlink_metadata(&output).is_ok() {
            return Err(ConfigError::OutputInsideInput { input, output });
        }

        let locale = parse_locale(&self.config.month_locale)?;

        Ok(ValidatedConfig {
            input,
            output,
            locale,
        })
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<RunReport> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<RunReport> {
        let validated = self.validate()?;
        let start_time = Instant::now();

        events.send(Event::Pipeline(PipelineEvent::Started));
        info!("Input directory [{}]", validated.input.display());

        PlacementExecutor::prepare_output_root(&validated.output).map_err(|source| {
            OrganizerError::Output {
                path: validated.output.clone(),
                source,
            }
        })?;

        // Phase 1: Listing
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));

        let scanner = WalkDirScanner::new(ScanConfig {
            exclude: Some(validated.output.clone()),
            ..Default::default()
        });
        let scan_result = scanner.scan_with_events(&validated.input, events);
        let input_files = scan_result.files.len();
        let scan_errors = scan_result.errors.len();

        // Phase 2: Timestamps
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Resolving,
        }));

        let resolver = TimestampResolver::new(&self.config.resolution);
        let (timestamped, resolve_stats) = resolver.resolve_all(scan_result.files, events);

        // Phase 3: Duplicates
        let (survivors, dedup_stats) = if self.config.skip_duplicate_check {
            info!("Duplicate check skipped");
            (timestamped, None)
        } else {
            events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
                phase: PipelinePhase::Deduplicating,
            }));
            let (survivors, stats) = Deduplicator::new().dedupe_with_events(timestamped, events);
            (survivors, Some(stats))
        };

        // Phase 4: Placement
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Placing,
        }));

        let executor =
            PlacementExecutor::new(PlacementPlanner::new(&validated.output, validated.locale));
        let placement_stats = executor.place_all(&survivors, events);

        let duration_ms = start_time.elapsed().as_millis() as u64;

        let report = RunReport {
            input_directory: validated.input,
            output_directory: validated.output,
            input_files,
            scan_errors,
            resolve: resolve_stats,
            dedup: dedup_stats,
            placement: placement_stats,
            duration_ms,
        };

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                input_files,
                duplicates_skipped: report.duplicates_skipped(),
                files_copied: report.files_copied(),
                copy_failures: report.failures().len(),
                duration_ms,
            },
        }));

        Ok(report)
    }
}

/// Absolute form of `path`, resolving symlinks in whatever part exists
fn absolute_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    for ancestor in absolute.ancestors().skip(1) {
        if let Ok(canonical) = fs::canonicalize(ancestor) {
            if let Ok(rest) = absolute.strip_prefix(ancestor) {
                return canonical.join(rest);
            }
        }
    }
    absolute
}
