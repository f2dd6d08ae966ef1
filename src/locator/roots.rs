//! Scan-root construction.

use std::path::{Path, PathBuf};

use crate::paths::{normalize, PathSet};

/// Ordered, deduplicated set of existing directories to scan.
#[derive(Debug, Default, Clone)]
pub struct RootSet {
    roots: PathSet,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and add `path` if it exists and isn't already present.
    pub fn push(&mut self, path: &Path) -> bool {
        let path = normalize(path);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Skipping missing root");
            return false;
        }
        self.roots.insert(path)
    }

    pub fn extend<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.push(path.as_ref());
        }
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.roots.into_vec()
    }
}

/// Supported mod managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModManager {
    ModOrganizer2,
    Vortex,
}

impl ModManager {
    /// Directories to scan for a manager rooted at `base`.
    pub fn expand(self, base: &Path) -> Vec<PathBuf> {
        match self {
            ModManager::ModOrganizer2 => {
                let mut dirs = vec![base.to_path_buf()];
                dirs.extend(["mods", "overwrite", "profiles"].iter().map(|d| base.join(d)));
                dirs
            }
            ModManager::Vortex => vec![base.to_path_buf()],
        }
    }
}

/// Per-user directories the game and Vortex write to.
#[derive(Debug, Clone, Default)]
pub struct ProfileDirs {
    /// `Documents`
    pub documents: Option<PathBuf>,
    /// `%LOCALAPPDATA%`
    pub local_data: Option<PathBuf>,
    /// `%APPDATA%`
    pub roaming_data: Option<PathBuf>,
}

/// Vortex's per-game folder names for Fallout New Vegas.
const VORTEX_GAME_IDS: &[&str] = &["falloutnv", "fallout new vegas"];

impl ProfileDirs {
    pub fn from_system() -> Self {
        Self {
            documents: dirs::document_dir(),
            local_data: dirs::data_local_dir(),
            roaming_data: dirs::data_dir(),
        }
    }

    /// Saves, ini files and Vortex state. Not filtered for existence.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(docs) = &self.documents {
            let my_games = docs.join("My Games");
            dirs.push(my_games.join("FalloutNV"));
            dirs.push(my_games.join("Fallout New Vegas"));
        }
        if let Some(local) = &self.local_data {
            dirs.push(local.join("FalloutNV"));
            dirs.push(local.join("Fallout New Vegas"));
            dirs.push(local.join("Bethesda Softworks").join("FalloutNV"));
        }
        if let Some(roaming) = &self.roaming_data {
            let vortex = roaming.join("Vortex");
            dirs.extend(VORTEX_GAME_IDS.iter().map(|g| vortex.join(g)));
            dirs.push(vortex);
        }
        dirs
    }

    /// Vortex staging folders in their default location.
    pub fn vortex_mod_dirs(&self) -> Vec<PathBuf> {
        self.roaming_data
            .iter()
            .flat_map(|roaming| {
                VORTEX_GAME_IDS
                    .iter()
                    .map(move |g| roaming.join("Vortex").join(g).join("mods"))
            })
            .filter(|p| p.exists())
            .collect()
    }
}

/// Explicitly configured mod-manager directories.
#[derive(Debug, Clone, Default)]
pub struct ManagerDirs {
    pub mo2: Option<PathBuf>,
    pub vortex: Option<PathBuf>,
}

/// `Mod Organizer 2` folders next to the game (parent or grandparent).
pub fn mo2_near_game(game_dir: &Path) -> Vec<PathBuf> {
    game_dir
        .ancestors()
        .skip(1)
        .take(2)
        .map(|parent| parent.join("Mod Organizer 2"))
        .filter(|p| p.exists())
        .collect()
}

/// Build the scan roots: game folders, profile folders, then mod managers.
pub fn build_roots(
    game_dir: Option<&Path>,
    managers: &ManagerDirs,
    profile: &ProfileDirs,
) -> RootSet {
    let mut roots = RootSet::new();

    if let Some(game) = game_dir {
        roots.push(game);
        roots.push(&game.join("Data"));
        roots.push(&game.join("Data").join("nvse").join("plugins"));
    }

    roots.extend(profile.candidates());

    match &managers.vortex {
        Some(vortex) => roots.extend(ModManager::Vortex.expand(vortex)),
        None => roots.extend(profile.vortex_mod_dirs()),
    }

    let mo2_bases = match &managers.mo2 {
        Some(mo2) => vec![mo2.clone()],
        None => game_dir.map(mo2_near_game).unwrap_or_default(),
    };
    for base in mo2_bases {
        roots.extend(ModManager::ModOrganizer2.expand(&base));
    }

    tracing::info!(count = roots.len(), "Built scan roots");
    roots
}
