//! Install-directory detectors.

use std::path::{Path, PathBuf};

use super::library::{library_folders, HOME_STEAM_PATHS};
use super::registry::{InstalledAppLocator, GAME_REGISTRY_KEYS, INSTALLED_PATH_VALUE};

/// Executable whose presence marks a Fallout New Vegas install.
pub const GAME_EXECUTABLE: &str = "FalloutNV.exe";

/// Folder name the game uses inside store libraries.
pub const GAME_FOLDER: &str = "Fallout New Vegas";

/// True if `dir` contains the game launcher.
pub fn is_game_dir(dir: &Path) -> bool {
    dir.join(GAME_EXECUTABLE).is_file()
}

/// A source of candidate install directories.
///
/// Detectors never fail; a source that doesn't apply returns nothing.
/// Candidates are not validated here, the caller checks each one with
/// [`is_game_dir`].
pub trait InstallDetector {
    /// Short name for logging (e.g., "registry").
    fn name(&self) -> &'static str;

    /// Zero or more candidate install directories.
    fn candidates(&self) -> Vec<PathBuf>;
}

/// Program-files directories the store launchers install under.
#[derive(Debug, Clone, Default)]
pub struct ProgramDirs {
    pub program_files_x86: Option<PathBuf>,
    pub program_files: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl ProgramDirs {
    /// Read `%ProgramFiles(x86)%`, `%ProgramFiles%` and the home directory.
    pub fn from_env() -> Self {
        Self {
            program_files_x86: std::env::var_os("ProgramFiles(x86)").map(PathBuf::from),
            program_files: std::env::var_os("ProgramFiles").map(PathBuf::from),
            home: dirs::home_dir(),
        }
    }

    fn program_roots(&self) -> impl Iterator<Item = &PathBuf> {
        self.program_files_x86.iter().chain(self.program_files.iter())
    }

    /// Every Steam installation root worth checking for a library manifest.
    pub fn steam_roots(&self) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = self.program_roots().map(|p| p.join("Steam")).collect();
        if let Some(home) = &self.home {
            roots.extend(HOME_STEAM_PATHS.iter().map(|rel| home.join(rel)));
        }
        roots
    }
}

/// Reads the install path the game registered with the OS.
pub struct RegistryDetector {
    locator: Box<dyn InstalledAppLocator>,
}

impl RegistryDetector {
    pub fn new(locator: Box<dyn InstalledAppLocator>) -> Self {
        Self { locator }
    }
}

impl InstallDetector for RegistryDetector {
    fn name(&self) -> &'static str {
        "registry"
    }

    fn candidates(&self) -> Vec<PathBuf> {
        GAME_REGISTRY_KEYS
            .iter()
            .filter_map(|key| self.locator.lookup(key, INSTALLED_PATH_VALUE))
            .collect()
    }
}

/// Looks through every library listed in Steam's `libraryfolders.vdf`.
pub struct SteamLibraryDetector {
    steam_roots: Vec<PathBuf>,
}

impl SteamLibraryDetector {
    pub fn new(steam_roots: Vec<PathBuf>) -> Self {
        Self { steam_roots }
    }
}

impl InstallDetector for SteamLibraryDetector {
    fn name(&self) -> &'static str {
        "steam-library"
    }

    fn candidates(&self) -> Vec<PathBuf> {
        self.steam_roots
            .iter()
            .flat_map(|root| library_folders(root))
            .map(|lib| lib.join("steamapps").join("common").join(GAME_FOLDER))
            .collect()
    }
}

/// Default Steam and GOG Galaxy install folders.
pub struct CommonLocationsDetector {
    dirs: ProgramDirs,
}

impl CommonLocationsDetector {
    pub fn new(dirs: ProgramDirs) -> Self {
        Self { dirs }
    }
}

impl InstallDetector for CommonLocationsDetector {
    fn name(&self) -> &'static str {
        "common-locations"
    }

    fn candidates(&self) -> Vec<PathBuf> {
        self.dirs
            .program_roots()
            .flat_map(|root| {
                [
                    root.join("Steam").join("steamapps").join("common").join(GAME_FOLDER),
                    root.join("GOG Galaxy").join("Games").join(GAME_FOLDER),
                ]
            })
            .collect()
    }
}

/// The detector chain in priority order: registry, Steam libraries, common
/// locations.
pub fn default_detectors(
    locator: Box<dyn InstalledAppLocator>,
    dirs: ProgramDirs,
) -> Vec<Box<dyn InstallDetector>> {
    vec![
        Box::new(RegistryDetector::new(locator)),
        Box::new(SteamLibraryDetector::new(dirs.steam_roots())),
        Box::new(CommonLocationsDetector::new(dirs)),
    ]
}
