//! NVMP name and line matching.
//!
//! The vocabulary is fixed and kept conservative so unrelated mods that merely
//! contain the same letters are left alone.

use regex::{RegexSet, RegexSetBuilder};
use std::sync::LazyLock;

/// Name patterns, matched case-insensitively anywhere in the text.
pub const NAME_PATTERNS: &[&str] = &[
    r"\bnvmp\b",
    r"nvmp_",
    r"new\s*vegas\s*mp",
    r"newvegasmp",
    r"new\s*vegas\s*multiplayer",
];

/// Known NVMP file names (lowercase), for partially renamed installs.
pub const KNOWN_FILENAMES: &[&str] = &[
    "nvmp_launcher.exe",
    "nvmp_start.exe",
    "nvmp_storyserver.exe",
    "nvmp.log",
    "nvmp_launcher_last_error.log",
];

static DEFAULT_MATCHER: LazyLock<Matcher> = LazyLock::new(Matcher::new);

/// Decides whether a file name or a line of text refers to NVMP.
#[derive(Debug, Clone)]
pub struct Matcher {
    patterns: RegexSet,
}

impl Matcher {
    /// Build the matcher from [`NAME_PATTERNS`].
    pub fn new() -> Self {
        let patterns = RegexSetBuilder::new(NAME_PATTERNS)
            .case_insensitive(true)
            .build()
            .expect("built-in NVMP patterns are valid");
        Self { patterns }
    }

    /// True if `text` is a known NVMP file name or hits any name pattern.
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        if KNOWN_FILENAMES.contains(&lower.as_str()) {
            return true;
        }
        self.patterns.is_match(text)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for the shared default [`Matcher`].
pub fn matches(text: &str) -> bool {
    DEFAULT_MATCHER.matches(text)
}
