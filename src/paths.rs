//! Path helpers shared by the locator, scanner, editor and remover.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf, Prefix};

/// Absolute form of `path`, resolved through the filesystem when it exists.
pub fn normalize(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Case-insensitive identity used for every dedup in this crate.
pub fn dedup_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

/// Insertion-ordered, case-insensitive set of paths.
#[derive(Debug, Default, Clone)]
pub struct PathSet {
    seen: HashSet<String>,
    paths: Vec<PathBuf>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `path` unless an equivalent one is already present.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.seen.insert(dedup_key(&path)) {
            self.paths.push(path);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(&dedup_key(path))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths
    }

    /// Consume into a list sorted by lowercase path.
    pub fn into_sorted_vec(self) -> Vec<PathBuf> {
        let mut paths = self.paths;
        paths.sort_by_cached_key(|p| dedup_key(p));
        paths
    }
}

/// Relative form of an absolute path that can be recreated under a backup
/// folder.
///
/// Drive and UNC prefixes become plain directory names (`C:\Games` turns
/// into `C\Games`), the root separator is dropped and any stray `:` is
/// removed so every component is a legal file name.
pub fn mirror_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => match prefix.kind() {
                Prefix::Disk(letter) | Prefix::VerbatimDisk(letter) => {
                    out.push(char::from(letter).to_string());
                }
                Prefix::UNC(server, share) | Prefix::VerbatimUNC(server, share) => {
                    out.push(server);
                    out.push(share);
                }
                Prefix::Verbatim(name) | Prefix::DeviceNS(name) => {
                    out.push(strip_separators(&name.to_string_lossy()));
                }
            },
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => out.push(".."),
            Component::Normal(name) => {
                let name = name.to_string_lossy();
                if name.contains(':') {
                    out.push(name.replace(':', ""));
                } else {
                    out.push(component.as_os_str());
                }
            }
        }
    }

    out
}

fn strip_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ':' | '\\' | '/' | '?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_existing_is_absolute() {
        let tmp = TempDir::new().unwrap();
        let normalized = normalize(tmp.path());
        assert!(normalized.is_absolute());
        assert!(normalized.exists());
    }

    #[test]
    fn test_normalize_missing_is_still_absolute() {
        let normalized = normalize(Path::new("does/not/exist"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_path_set_dedups_case_insensitively() {
        let mut set = PathSet::new();
        assert!(set.insert(PathBuf::from("/Games/FNV/Data")));
        assert!(!set.insert(PathBuf::from("/games/fnv/data")));
        assert!(set.insert(PathBuf::from("/Games/FNV")));
        assert_eq!(set.len(), 2);
        assert!(set.contains(Path::new("/GAMES/FNV")));
    }

    #[test]
    fn test_path_set_sorted_output() {
        let mut set = PathSet::new();
        set.insert(PathBuf::from("/b"));
        set.insert(PathBuf::from("/A"));
        set.insert(PathBuf::from("/c"));
        assert_eq!(
            set.into_sorted_vec(),
            vec![
                PathBuf::from("/A"),
                PathBuf::from("/b"),
                PathBuf::from("/c")
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_mirror_path_drops_root() {
        assert_eq!(
            mirror_path(Path::new("/games/fnv/NVMP_Launcher.exe")),
            PathBuf::from("games/fnv/NVMP_Launcher.exe")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_mirror_path_strips_colons() {
        assert_eq!(
            mirror_path(Path::new("/mnt/C:/Games")),
            PathBuf::from("mnt/C/Games")
        );
    }

    #[cfg(windows)]
    #[test]
    fn test_mirror_path_strips_drive_separator() {
        assert_eq!(
            mirror_path(Path::new(r"C:\Games\FNV\nvmp.log")),
            PathBuf::from(r"C\Games\FNV\nvmp.log")
        );
        assert_eq!(
            mirror_path(Path::new(r"\\?\D:\Steam\x")),
            PathBuf::from(r"D\Steam\x")
        );
    }

    #[test]
    fn test_mirror_path_is_relative() {
        let tmp = TempDir::new().unwrap();
        let mirrored = mirror_path(&normalize(tmp.path()));
        assert!(mirrored.is_relative());
    }
}
