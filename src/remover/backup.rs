use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::DirEntry;

use crate::paths::{mirror_path, normalize};

/// Prefix of every backup folder name.
pub const BACKUP_PREFIX: &str = "NVMP_Removed_";

/// True for a backup folder left by this or an earlier run.
///
/// Its name matches the NVMP patterns, so walkers must prune it.
pub fn is_backup_folder(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with(BACKUP_PREFIX)
}

/// The per-run backup folder.
///
/// The location is fixed when the run starts, but nothing is created on disk
/// until [`BackupDir::ensure`] is first called.
#[derive(Debug, Clone)]
pub struct BackupDir {
    path: PathBuf,
}

impl BackupDir {
    /// `<base>/NVMP_Removed_<YYYYmmdd_HHMMSS>` using the local clock.
    pub fn new(base: &Path) -> Self {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        Self::with_name(base, &format!("{BACKUP_PREFIX}{stamp}"))
    }

    /// Backup folder with an explicit folder name under `base`.
    pub fn with_name(base: &Path, name: &str) -> Self {
        Self {
            path: normalize(base).join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once the folder exists on disk.
    pub fn is_created(&self) -> bool {
        self.path.is_dir()
    }

    /// Create the folder if needed.
    pub fn ensure(&self) -> io::Result<&Path> {
        fs::create_dir_all(&self.path)?;
        Ok(&self.path)
    }

    /// Where a removed item is moved to, mirroring its original location.
    pub fn destination_for(&self, original: &Path) -> PathBuf {
        self.path.join(mirror_path(original))
    }

    /// A free `<file name>.bak` slot for a pre-edit copy of `original`.
    ///
    /// Several load lists share a name (one `plugins.txt` per MO2 profile),
    /// so later copies become `<file name>.<n>.bak`.
    pub fn text_backup_for(&self, original: &Path) -> PathBuf {
        let name = original
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let first = self.path.join(format!("{name}.bak"));
        if !first.exists() {
            return first;
        }
        (1..)
            .map(|n| self.path.join(format!("{name}.{n}.bak")))
            .find(|p| !p.exists())
            .unwrap_or(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_is_lazy_and_timestamped() {
        let tmp = TempDir::new().unwrap();
        let backup = BackupDir::new(tmp.path());

        let name = backup.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(BACKUP_PREFIX));
        // YYYYmmdd_HHMMSS
        assert_eq!(name.len(), BACKUP_PREFIX.len() + 15);
        assert!(!backup.is_created());

        backup.ensure().unwrap();
        assert!(backup.is_created());
    }

    #[cfg(unix)]
    #[test]
    fn test_destination_mirrors_original() {
        let backup = BackupDir::with_name(Path::new("/backups"), "run");
        assert_eq!(
            backup.destination_for(Path::new("/games/fnv/nvmp.log")),
            PathBuf::from("/backups/run/games/fnv/nvmp.log")
        );
    }

    #[test]
    fn test_text_backup_names_do_not_collide() {
        let tmp = TempDir::new().unwrap();
        let backup = BackupDir::with_name(tmp.path(), "run");
        backup.ensure().unwrap();

        let first = backup.text_backup_for(Path::new("/a/plugins.txt"));
        assert!(first.ends_with("plugins.txt.bak"));
        fs::write(&first, "x").unwrap();

        let second = backup.text_backup_for(Path::new("/b/plugins.txt"));
        assert!(second.ends_with("plugins.txt.1.bak"));
    }

    #[test]
    fn test_backup_folders_are_recognized() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("NVMP_Removed_20240101_120000")).unwrap();
        fs::write(tmp.path().join("NVMP_Removed_notes.txt"), "").unwrap();
        fs::create_dir_all(tmp.path().join("NVMP")).unwrap();

        let mut pruned: Vec<_> = walkdir::WalkDir::new(tmp.path())
            .min_depth(1)
            .into_iter()
            .flatten()
            .filter(is_backup_folder)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        pruned.sort();
        assert_eq!(pruned, ["NVMP_Removed_20240101_120000"]);
    }
}
