use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::paths::dedup_key;

/// Drop every path that lies inside another path of the set.
///
/// Paths are visited shallowest first (then case-insensitively by name), so
/// a matched directory is kept and its matched children are removed with it
/// as one unit. Applying this twice gives the same result as applying it once.
pub fn collapse_covered(paths: &[PathBuf]) -> Vec<PathBuf> {
    let keys: HashSet<String> = paths.iter().map(|p| dedup_key(p)).collect();

    let mut sorted: Vec<&PathBuf> = paths.iter().collect();
    sorted.sort_by_cached_key(|p| (p.components().count(), dedup_key(p)));

    sorted
        .into_iter()
        .filter(|p| !is_covered(p, &keys))
        .cloned()
        .collect()
}

fn is_covered(path: &Path, keys: &HashSet<String>) -> bool {
    path.ancestors()
        .skip(1)
        .any(|parent| keys.contains(&dedup_key(parent)))
}
