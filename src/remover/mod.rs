//! Removal of matched artifacts.
//!
//! Each path is handled on its own: a failure becomes that item's outcome
//! and the batch carries on.

mod backup;

pub use backup::{is_backup_folder, BackupDir, BACKUP_PREFIX};

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// `rename` error code for a move across filesystems.
#[cfg(unix)]
const CROSS_DEVICE: i32 = 18; // EXDEV
#[cfg(windows)]
const CROSS_DEVICE: i32 = 17; // ERROR_NOT_SAME_DEVICE
#[cfg(not(any(unix, windows)))]
const CROSS_DEVICE: i32 = -1;

/// What happened to one matched path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Moved into the backup folder.
    Moved { destination: PathBuf },
    /// Deleted permanently.
    Deleted,
    /// Dry run: would have been moved.
    WouldMove { destination: PathBuf },
    /// Dry run: would have been deleted.
    WouldDelete,
    /// Nothing done (e.g. already gone with a removed parent).
    Skipped { reason: String },
    /// The OS refused or failed.
    Failed { error: String },
}

impl RemoveOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RemoveOutcome::Failed { .. })
    }
}

impl fmt::Display for RemoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveOutcome::Moved { destination } => write!(f, "MOVED -> {}", destination.display()),
            RemoveOutcome::Deleted => write!(f, "DELETED"),
            RemoveOutcome::WouldMove { destination } => {
                write!(f, "WOULD MOVE -> {}", destination.display())
            }
            RemoveOutcome::WouldDelete => write!(f, "WOULD DELETE"),
            RemoveOutcome::Skipped { reason } => write!(f, "SKIP ({reason})"),
            RemoveOutcome::Failed { error } => write!(f, "ERROR ({error})"),
        }
    }
}

/// How matched paths are disposed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoveOptions {
    /// Delete instead of moving into the backup folder.
    pub permanent: bool,
    /// Report only, touch nothing.
    pub dry_run: bool,
}

/// Applies the removal action to matched paths.
pub struct Remover<'a> {
    options: RemoveOptions,
    backup: Option<&'a BackupDir>,
}

impl<'a> Remover<'a> {
    /// `backup` is only consulted when not in permanent mode.
    pub fn new(options: RemoveOptions, backup: Option<&'a BackupDir>) -> Self {
        Self { options, backup }
    }

    /// Remove one path, never failing the caller.
    pub fn remove(&self, path: &Path) -> (PathBuf, RemoveOutcome) {
        let outcome = match self.try_remove(path) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Removal failed");
                RemoveOutcome::Failed {
                    error: describe_error(&err),
                }
            }
        };
        (path.to_path_buf(), outcome)
    }

    fn try_remove(&self, path: &Path) -> io::Result<RemoveOutcome> {
        // symlink_metadata so dangling links still count as present
        let metadata = match fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(RemoveOutcome::Skipped {
                    reason: "missing".to_string(),
                });
            }
            Err(err) => return Err(err),
        };

        if self.options.permanent {
            if self.options.dry_run {
                return Ok(RemoveOutcome::WouldDelete);
            }
            delete(path, &metadata)?;
            return Ok(RemoveOutcome::Deleted);
        }

        let Some(backup) = self.backup else {
            return Ok(RemoveOutcome::Failed {
                error: "no backup dir set".to_string(),
            });
        };

        let destination = backup.destination_for(path);
        if self.options.dry_run {
            return Ok(RemoveOutcome::WouldMove { destination });
        }

        backup.ensure()?;
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        move_item(path, &destination)?;
        Ok(RemoveOutcome::Moved { destination })
    }
}

/// Total size in bytes of a file or directory tree, links not followed.
pub fn item_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

fn describe_error(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::PermissionDenied => {
            "permission denied; run as Administrator".to_string()
        }
        kind => format!("{kind:?}: {err}"),
    }
}

fn delete(path: &Path, metadata: &fs::Metadata) -> io::Result<()> {
    if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else if is_directory_link(metadata) {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

/// Directory symlinks and junctions on Windows are removed like empty dirs.
#[cfg(windows)]
fn is_directory_link(metadata: &fs::Metadata) -> bool {
    use std::os::windows::fs::FileTypeExt;
    metadata.file_type().is_symlink_dir()
}

#[cfg(not(windows))]
fn is_directory_link(_metadata: &fs::Metadata) -> bool {
    false
}

fn move_item(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(err) if err.raw_os_error() == Some(CROSS_DEVICE) => {
            tracing::debug!(src = %src.display(), "Cross-device move, copying instead");
            copy_tree(src, dst)?;
            let metadata = fs::symlink_metadata(src)?;
            delete(src, &metadata)
        }
        Err(err) => Err(err),
    }
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry.path().strip_prefix(src).unwrap_or(Path::new(""));
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_link(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_link(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(src)?, dst)
}

#[cfg(not(unix))]
fn copy_link(src: &Path, _dst: &Path) -> io::Result<()> {
    tracing::warn!(path = %src.display(), "Not copying symlink across devices");
    Ok(())
}
