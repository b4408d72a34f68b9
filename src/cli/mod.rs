//! # CLI Module
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! # Organize a dump into ./output
//! photo-organize organize ~/Dump
//!
//! # Prefer EXIF dates and shift everything by an hour
//! photo-organize organize ~/Dump -o ~/Sorted --use-exif --time-offset 60
//!
//! # Apply a camera profile, JSON report on stdout
//! photo-organize organize ~/Dump --profile nexus5x --format json
//!
//! # List the known camera profiles
//! photo-organize profiles
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_organizer::core::organize::DEFAULT_MONTH_LOCALE;
use photo_organizer::core::pipeline::Pipeline;
use photo_organizer::core::reporter::{self, RunReport};
use photo_organizer::core::timestamp::all_profiles;
use photo_organizer::events::{
    DedupEvent, Event, EventChannel, EventReceiver, PipelineEvent, PlaceEvent, ResolveEvent,
    ScanEvent,
};
use photo_organizer::OrganizerError;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use tracing::error;

/// Photo Organizer - Sort a photo dump into dated folders
#[derive(Parser, Debug)]
#[command(name = "photo-organize")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy every file under INPUT into a year/month tree
    Organize {
        /// Directory to organize (never modified)
        input: PathBuf,

        /// Output directory; anything already there is deleted first
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Read EXIF capture dates before falling back to file attributes
        #[arg(long)]
        use_exif: bool,

        /// Copy byte-identical files too
        #[arg(long)]
        skip_duplicate_check: bool,

        /// Shift timestamps by this many minutes (may be negative)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        time_offset: i32,

        /// Device profile (see `profiles`)
        #[arg(long)]
        profile: Option<String>,

        /// Locale for month folder names
        #[arg(long, default_value = DEFAULT_MONTH_LOCALE)]
        locale: String,

        /// Report format
        #[arg(short, long, default_value = "pretty")]
        format: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the known device profiles
    Profiles,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable table with progress bar
    Pretty,
    /// JSON report for scripting
    Json,
}

/// Run the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Organize {
            input,
            output,
            use_exif,
            skip_duplicate_check,
            time_offset,
            profile,
            locale,
            format,
            verbose,
        } => {
            photo_organizer::init_tracing(verbose);

            let pipeline = Pipeline::builder()
                .input(input)
                .output(output)
                .use_embedded_metadata(use_exif)
                .skip_duplicate_check(skip_duplicate_check)
                .time_offset_minutes(time_offset)
                .device_profile(profile)
                .month_locale(locale)
                .build();

            run_organize(&pipeline, format, verbose)
        }
        Commands::Profiles => {
            print_profiles();
            ExitCode::SUCCESS
        }
    }
}

fn run_organize(pipeline: &Pipeline, format: OutputFormat, verbose: bool) -> ExitCode {
    let term = Term::stderr();

    if matches!(format, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photo Organizer").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    // Set up event handling
    let (sender, receiver) = EventChannel::new();

    let progress = match format {
        OutputFormat::Pretty => Some(progress_bar()),
        OutputFormat::Json => None,
    };

    let progress_clone = progress.clone();
    let event_thread = thread::spawn(move || render_events(receiver, progress_clone, verbose));

    let result = pipeline.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match result {
        Ok(report) => {
            if let Err(e) = print_report(&report, format) {
                error!("Failed to render report: {}", e);
                return ExitCode::FAILURE;
            }
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            term.write_line(&format!("{} {}", style("error:").red().bold(), e))
                .ok();
            if matches!(e, OrganizerError::Config(_)) {
                term.write_line(&format!(
                    "{}",
                    style("Usage: photo-organize organize <INPUT> [-o OUTPUT] (see --help)").dim()
                ))
                .ok();
            }
            ExitCode::from(2)
        }
    }
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    let bar_style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|s| s.progress_chars("█▓░"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(bar_style);
    pb
}

fn render_events(receiver: EventReceiver, progress: Option<ProgressBar>, verbose: bool) {
    let Some(pb) = progress else {
        receiver.iter().for_each(drop);
        return;
    };

    for event in receiver.iter() {
        match event {
            Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                pb.set_position(0);
                pb.set_message(format!("{}", phase));
            }
            Event::Scan(ScanEvent::Completed { total_files }) => {
                pb.set_length(total_files as u64);
            }
            Event::Scan(ScanEvent::Error { path, message }) => {
                pb.println(format!(
                    "  {} {}: {}",
                    style("skipped").yellow(),
                    path.display(),
                    message
                ));
            }
            Event::Resolve(ResolveEvent::Progress(p))
            | Event::Dedup(DedupEvent::Progress(p))
            | Event::Place(PlaceEvent::Progress(p)) => {
                pb.set_length(p.total as u64);
                pb.set_position(p.completed as u64);
                if verbose {
                    if let Some(name) = p.current_path.file_name() {
                        pb.set_message(name.to_string_lossy().into_owned());
                    }
                }
            }
            Event::Dedup(DedupEvent::DuplicateFound { path, original }) if verbose => {
                pb.println(format!(
                    "  {} {} (same as {})",
                    style("duplicate").dim(),
                    path.display(),
                    original.display()
                ));
            }
            Event::Place(PlaceEvent::Failed { path, message }) => {
                pb.println(format!(
                    "  {} {}: {}",
                    style("failed").red().bold(),
                    path.display(),
                    message
                ));
            }
            Event::Pipeline(PipelineEvent::Completed { .. }) => {
                pb.finish_and_clear();
            }
            _ => {}
        }
    }
}

fn print_report(report: &RunReport, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Pretty => {
            print!("{}", reporter::render_table(report));
            let term = Term::stderr();
            let status = if report.is_success() {
                style("✓").green().bold().to_string()
            } else {
                style("✗").red().bold().to_string()
            };
            term.write_line(&format!(
                "{} Organized into {}",
                status,
                report.output_directory.display()
            ))
            .ok();
        }
        OutputFormat::Json => println!("{}", reporter::render_json(report)?),
    }
    Ok(())
}

fn print_profiles() {
    println!(
        "{:<14}{:<10}{:>14}{:>14}",
        "PROFILE", "EXIF", "PHOTO (min)", "VIDEO (min)"
    );
    for (name, profile) in all_profiles() {
        println!(
            "{:<14}{:<10}{:>14}{:>14}",
            name,
            if profile.uses_embedded_metadata { "yes" } else { "no" },
            profile.photo_offset_minutes,
            profile.video_offset_minutes
        );
    }
}
