use std::path::PathBuf;
use walkdir::WalkDir;

use crate::matcher::Matcher;
use crate::paths::PathSet;
use crate::remover::is_backup_folder;

/// Result of a signature scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Matched paths, sorted case-insensitively.
    pub matches: Vec<PathBuf>,
    /// True if the walk stopped early because the cap was hit.
    pub cap_reached: bool,
}

/// Walk every root and collect entries whose name matches.
///
/// Symlinks are never followed. The root directories themselves are not
/// tested, only what lies beneath them. Overlapping roots are fine: each path
/// is recorded once. Backup folders from earlier runs are skipped entirely.
/// Once `cap` paths have been collected the walk stops and
/// the partial result is returned with `cap_reached` set.
pub fn find_matches(roots: &[PathBuf], cap: usize, matcher: &Matcher) -> ScanReport {
    let mut found = PathSet::new();
    let mut cap_reached = false;

    'roots: for root in roots {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_backup_folder(e));

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!(%err, "Skipping unreadable entry");
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy();
            if !matcher.matches(&name) {
                continue;
            }

            if found.insert(entry.path().to_path_buf()) {
                tracing::debug!(path = %entry.path().display(), "Matched");
            }

            if found.len() >= cap {
                tracing::warn!(cap, "Match cap reached, stopping scan early");
                cap_reached = true;
                break 'roots;
            }
        }
    }

    ScanReport {
        matches: found.into_sorted_vec(),
        cap_reached,
    }
}
