//! Steam `libraryfolders.vdf` handling.
//!
//! Only the quoted `"path"` entries are needed, so the manifest is read with
//! a single pattern instead of a full VDF parser.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static PATH_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"\s*path\s*"\s*"([^"]+)""#).expect("library path pattern is valid")
});

/// Steam locations under `$HOME` on Linux (native, Flatpak, Snap).
pub const HOME_STEAM_PATHS: &[&str] = &[
    ".local/share/Steam",
    ".steam/steam",
    ".steam/debian-installation",
    ".var/app/com.valvesoftware.Steam/data/Steam",
    ".var/app/com.valvesoftware.Steam/.local/share/Steam",
    "snap/steam/common/.local/share/Steam",
];

/// Extract every `"path" "<dir>"` value from manifest text.
///
/// VDF escapes backslashes, so `C:\\Games` becomes `C:\Games`.
pub fn parse_library_paths(content: &str) -> Vec<PathBuf> {
    PATH_ENTRY
        .captures_iter(content)
        .map(|caps| PathBuf::from(caps[1].replace(r"\\", r"\")))
        .collect()
}

/// Library folders listed by the manifest under `steam_root`.
///
/// A missing or unreadable manifest yields an empty list.
pub fn library_folders(steam_root: &Path) -> Vec<PathBuf> {
    let manifest = steam_root.join("steamapps").join("libraryfolders.vdf");
    match fs::read(&manifest) {
        Ok(bytes) => parse_library_paths(&String::from_utf8_lossy(&bytes)),
        Err(err) => {
            tracing::debug!(path = %manifest.display(), %err, "No Steam library manifest");
            Vec::new()
        }
    }
}
