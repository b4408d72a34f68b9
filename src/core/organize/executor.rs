//! Copies files into the planned tree.

use super::planner::PlacementPlanner;
use super::types::*;
use crate::core::timestamp::TimestampedFile;
use crate::error::PlacementError;
use crate::events::{Event, EventSender, PlaceEvent, StageProgress};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Executes placement for a sequence of files
pub struct PlacementExecutor {
    planner: PlacementPlanner,
}

impl PlacementExecutor {
    pub fn new(planner: PlacementPlanner) -> Self {
        Self { planner }
    }

    pub fn planner(&self) -> &PlacementPlanner {
        &self.planner
    }

    /// Delete whatever is at `root` and create it empty
    pub fn prepare_output_root(root: &Path) -> io::Result<()> {
        match fs::symlink_metadata(root) {
            Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(root)?,
            Ok(_) => fs::remove_file(root)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        fs::create_dir_all(root)?;
        info!("Output directory [{}] created", root.display());
        Ok(())
    }

    /// Copy every file, in order. Failures are recorded and skipped.
    pub fn place_all(&self, files: &[TimestampedFile], events: &EventSender) -> PlacementStats {
        let mut stats = PlacementStats::default();
        let mut created_dirs: HashSet<PathBuf> = HashSet::new();
        let total = files.len();

        for (i, file) in files.iter().enumerate() {
            events.send(Event::Place(PlaceEvent::Progress(StageProgress {
                completed: i + 1,
                total,
                current_path: file.source.path.clone(),
            })));

            match self.place(file, &mut created_dirs, &mut stats) {
                Ok(target) => {
                    info!("[{}] => [{}]", file.source.file_name().display(), target.display());
                    stats.record_copy(file.source.extension());
                    events.send(Event::Place(PlaceEvent::FileCopied {
                        from: file.source.path.clone(),
                        to: target,
                    }));
                }
                Err(e) => {
                    error!("{}", e);
                    events.send(Event::Place(PlaceEvent::Failed {
                        path: file.source.path.clone(),
                        message: e.to_string(),
                    }));
                    stats.failures.push(PlacementFailure {
                        path: file.source.path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        stats
    }

    /// Copy one file to the first free name in its month directory
    fn place(
        &self,
        file: &TimestampedFile,
        created_dirs: &mut HashSet<PathBuf>,
        stats: &mut PlacementStats,
    ) -> Result<PathBuf, PlacementError> {
        let directory = self.planner.target_directory(file.timestamp.at);
        if !created_dirs.contains(&directory) {
            let existed = directory.is_dir();
            fs::create_dir_all(&directory).map_err(|source| PlacementError::CreateDirectory {
                path: directory.clone(),
                source,
            })?;
            if !existed {
                stats.folders_created += 1;
            }
            created_dirs.insert(directory);
        }

        let mut counter = 0u32;
        loop {
            let target = self.planner.plan(file, counter).target_path();

            if target.exists() {
                warn!("Target file [{}] already exists, trying next suffix", target.display());
            } else {
                match copy_new(&file.source.path, &target) {
                    Ok(()) => {
                        if counter > 0 {
                            stats.renamed_on_collision += 1;
                        }
                        return Ok(target);
                    }
                    // Appeared between the check and the open
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                    Err(source) => {
                        return Err(PlacementError::Copy {
                            from: file.source.path.clone(),
                            to: target,
                            source,
                        })
                    }
                }
            }

            counter = counter.checked_add(1).ok_or_else(|| PlacementError::Copy {
                from: file.source.path.clone(),
                to: target.clone(),
                source: io::Error::new(io::ErrorKind::AlreadyExists, "no free file name left"),
            })?;
        }
    }
}

/// Copy content into a file that must not exist yet, then carry over the
/// modification time and permissions where the platform allows.
fn copy_new(from: &Path, to: &Path) -> io::Result<()> {
    let mut source = File::open(from)?;
    let metadata = source.metadata()?;
    let mut target = OpenOptions::new().write(true).create_new(true).open(to)?;

    if let Err(e) = io::copy(&mut source, &mut target) {
        drop(target);
        let _ = fs::remove_file(to);
        return Err(e);
    }

    if let Ok(modified) = metadata.modified() {
        if let Err(e) = target.set_modified(modified) {
            warn!("Could not preserve modification time on [{}]: {}", to.display(), e);
        }
    }
    drop(target);

    if let Err(e) = fs::set_permissions(to, metadata.permissions()) {
        warn!("Could not preserve permissions on [{}]: {}", to.display(), e);
    }

    Ok(())
}
