//! Game install detection and scan-root discovery.
//!
//! Every detector runs, in order, and their candidates are merged before the
//! first valid install directory is chosen. A detector finding something never
//! stops the ones after it.

mod detector;
mod library;
mod registry;
mod roots;

pub use detector::{
    default_detectors, is_game_dir, CommonLocationsDetector, InstallDetector, ProgramDirs,
    RegistryDetector, SteamLibraryDetector, GAME_EXECUTABLE, GAME_FOLDER,
};
pub use library::{library_folders, parse_library_paths};
pub use registry::{
    platform_locator, InstalledAppLocator, NoRegistry, GAME_REGISTRY_KEYS, INSTALLED_PATH_VALUE,
};
pub use roots::{build_roots, mo2_near_game, ManagerDirs, ModManager, ProfileDirs, RootSet};

use std::path::PathBuf;

use crate::paths::{normalize, PathSet};

/// All valid install directories reported by `detectors`, in detector order.
pub fn detect_install_dirs(detectors: &[Box<dyn InstallDetector>]) -> Vec<PathBuf> {
    let mut found = PathSet::new();

    for detector in detectors {
        for candidate in detector.candidates() {
            if !is_game_dir(&candidate) {
                continue;
            }
            let candidate = normalize(&candidate);
            tracing::debug!(
                detector = detector.name(),
                path = %candidate.display(),
                "Found game install"
            );
            found.insert(candidate);
        }
    }

    found.into_vec()
}

/// The preferred install directory, if any detector found one.
pub fn find_install_dir(detectors: &[Box<dyn InstallDetector>]) -> Option<PathBuf> {
    detect_install_dirs(detectors).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct Fixed {
        paths: Vec<PathBuf>,
        calls: Rc<Cell<usize>>,
    }

    impl InstallDetector for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn candidates(&self) -> Vec<PathBuf> {
            self.calls.set(self.calls.get() + 1);
            self.paths.clone()
        }
    }

    fn game_dir(tmp: &TempDir, name: &str) -> PathBuf {
        let dir = tmp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(GAME_EXECUTABLE), "").unwrap();
        dir
    }

    #[test]
    fn test_all_detectors_run_and_merge() {
        let tmp = TempDir::new().unwrap();
        let first = game_dir(&tmp, "first");
        let second = game_dir(&tmp, "second");
        let calls = Rc::new(Cell::new(0));

        let detectors: Vec<Box<dyn InstallDetector>> = vec![
            Box::new(Fixed {
                paths: vec![first.clone()],
                calls: Rc::clone(&calls),
            }),
            Box::new(Fixed {
                paths: vec![first.clone(), second.clone()],
                calls: Rc::clone(&calls),
            }),
        ];

        let found = detect_install_dirs(&detectors);
        assert_eq!(calls.get(), 2);
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("first"));
        assert!(found[1].ends_with("second"));
        assert_eq!(find_install_dir(&detectors), Some(normalize(&first)));
    }

    #[test]
    fn test_candidates_without_executable_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("empty");
        fs::create_dir_all(&empty).unwrap();

        let detectors: Vec<Box<dyn InstallDetector>> = vec![Box::new(Fixed {
            paths: vec![empty, tmp.path().join("missing")],
            calls: Rc::new(Cell::new(0)),
        })];

        assert_eq!(find_install_dir(&detectors), None);
    }

    #[test]
    fn test_common_location_detection() {
        let tmp = TempDir::new().unwrap();
        let game = tmp.path().join("pf86/GOG Galaxy/Games/Fallout New Vegas");
        fs::create_dir_all(&game).unwrap();
        fs::write(game.join(GAME_EXECUTABLE), "").unwrap();

        let dirs = ProgramDirs {
            program_files_x86: Some(tmp.path().join("pf86")),
            program_files: None,
            home: None,
        };
        let detectors = default_detectors(Box::new(NoRegistry), dirs);
        assert_eq!(find_install_dir(&detectors), Some(normalize(&game)));
    }
}
