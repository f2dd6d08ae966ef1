//! Stripping NVMP lines from load lists and ini files.
//!
//! Edits always leave a pristine `.bak` copy in the backup folder, including
//! in permanent-delete mode.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::matcher::Matcher;
use crate::paths::PathSet;
use crate::remover::{is_backup_folder, BackupDir};

/// Plugin/load-order lists (vanilla and mod managers).
pub const LOADLIST_FILENAMES: &[&str] = &["plugins.txt", "loadorder.txt"];

/// Ini files NVMP may leave lines in.
pub const INI_FILENAMES: &[&str] = &["Fallout.ini", "FalloutPrefs.ini", "nvse_config.ini", "nvse.ini"];

/// Text files found under the scan roots, by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTargets {
    pub loadlists: Vec<PathBuf>,
    pub inis: Vec<PathBuf>,
}

impl TextTargets {
    /// Load lists first, then ini files.
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.loadlists.iter().chain(self.inis.iter())
    }

    pub fn len(&self) -> usize {
        self.loadlists.len() + self.inis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Find every load list and ini file under `roots` by exact file name.
///
/// Backup folders are not searched.
pub fn find_text_targets(roots: &[PathBuf]) -> TextTargets {
    let mut loadlists = PathSet::new();
    let mut inis = PathSet::new();

    for root in roots {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_backup_folder(e));

        for entry in walker.flatten() {
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if LOADLIST_FILENAMES.contains(&&*name) {
                loadlists.insert(entry.path().to_path_buf());
            } else if INI_FILENAMES.contains(&&*name) {
                inis.insert(entry.path().to_path_buf());
            }
        }
    }

    TextTargets {
        loadlists: loadlists.into_sorted_vec(),
        inis: inis.into_sorted_vec(),
    }
}

/// Result of cleaning one text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// No matching line; file untouched.
    Unchanged,
    /// Lines removed and the original saved to `backup`.
    Edited {
        path: PathBuf,
        removed: usize,
        backup: PathBuf,
    },
    /// Dry run: this many lines would go.
    WouldEdit { path: PathBuf, removed: usize },
    Failed { path: PathBuf, error: String },
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOutcome::Unchanged => Ok(()),
            EditOutcome::Edited { path, removed, .. } => write!(
                f,
                "EDITED: {} (removed {removed} NVMP line(s))",
                path.display()
            ),
            EditOutcome::WouldEdit { path, removed } => write!(
                f,
                "WOULD EDIT: {} ({removed} NVMP line(s))",
                path.display()
            ),
            EditOutcome::Failed { path, error } => {
                write!(f, "ERROR editing {}: {error}", path.display())
            }
        }
    }
}

/// Split `content` into lines, each keeping its own terminator.
fn split_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    content.split_inclusive(|b| *b == b'\n')
}

/// Removes matching lines from text files.
pub struct TextEditor<'a> {
    matcher: &'a Matcher,
    backup: &'a BackupDir,
    dry_run: bool,
}

impl<'a> TextEditor<'a> {
    pub fn new(matcher: &'a Matcher, backup: &'a BackupDir, dry_run: bool) -> Self {
        Self {
            matcher,
            backup,
            dry_run,
        }
    }

    /// Clean `path`, returning its report lines (none if nothing matched).
    pub fn clean_file(&self, path: &Path) -> Vec<String> {
        match self.edit(path) {
            EditOutcome::Unchanged => Vec::new(),
            outcome => vec![outcome.to_string()],
        }
    }

    /// Clean `path`. Errors are folded into [`EditOutcome::Failed`].
    pub fn edit(&self, path: &Path) -> EditOutcome {
        match self.try_edit(path) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Editing failed");
                let error = match err.kind() {
                    io::ErrorKind::PermissionDenied => {
                        "permission denied (run as Administrator)".to_string()
                    }
                    kind => format!("{kind:?}: {err}"),
                };
                EditOutcome::Failed {
                    path: path.to_path_buf(),
                    error,
                }
            }
        }
    }

    fn try_edit(&self, path: &Path) -> io::Result<EditOutcome> {
        if !path.is_file() {
            return Ok(EditOutcome::Unchanged);
        }

        let original = fs::read(path)?;
        let mut kept = Vec::with_capacity(original.len());
        let mut removed = 0;

        for line in split_lines(&original) {
            if self.matcher.matches(&String::from_utf8_lossy(line)) {
                removed += 1;
            } else {
                kept.extend_from_slice(line);
            }
        }

        if removed == 0 {
            return Ok(EditOutcome::Unchanged);
        }

        if self.dry_run {
            return Ok(EditOutcome::WouldEdit {
                path: path.to_path_buf(),
                removed,
            });
        }

        self.backup.ensure()?;
        let backup = self.backup.text_backup_for(path);
        fs::write(&backup, &original)?;
        fs::write(path, &kept)?;

        tracing::info!(path = %path.display(), removed, "Stripped NVMP lines");
        Ok(EditOutcome::Edited {
            path: path.to_path_buf(),
            removed,
            backup,
        })
    }
}
