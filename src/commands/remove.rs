//! The remove run: locate, scan, edit text files, remove artifacts, report.

use humansize::{format_size, BINARY};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::Config;
use crate::editor::{find_text_targets, EditOutcome, TextEditor};
use crate::error::{RemoverError, Result};
use crate::locator::{
    build_roots, default_detectors, find_install_dir, is_game_dir, platform_locator,
    ManagerDirs, ProfileDirs, ProgramDirs, GAME_EXECUTABLE,
};
use crate::matcher::Matcher;
use crate::paths::normalize;
use crate::remover::{item_size, BackupDir, RemoveOptions, Remover};
use crate::scanner::{collapse_covered, find_matches};

/// Everything a run needs, after CLI flags have been layered over config.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Explicit game directory; validated, never auto-detected.
    pub game_dir: Option<PathBuf>,
    pub managers: ManagerDirs,
    /// Base directory for the backup folder (cwd if unset).
    pub backup_base: Option<PathBuf>,
    pub permanent: bool,
    pub dry_run: bool,
    pub max_matches: usize,
}

impl RunSettings {
    /// CLI flags take precedence over config values.
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            game_dir: cli.game.clone().or_else(|| config.locator.game_dir.clone()),
            managers: ManagerDirs {
                mo2: cli.mo2.clone().or_else(|| config.locator.mo2_dir.clone()),
                vortex: cli.vortex.clone().or_else(|| config.locator.vortex_dir.clone()),
            },
            backup_base: cli
                .backup_dir
                .clone()
                .or_else(|| config.remover.backup_dir.clone()),
            permanent: cli.delete || config.remover.permanent,
            dry_run: cli.dry_run,
            max_matches: cli
                .max_matches
                .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
                .unwrap_or(config.remover.max_matches),
        }
    }
}

/// Where the run looks for things outside the explicit settings.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub profile: ProfileDirs,
    pub program_dirs: ProgramDirs,
}

impl Environment {
    pub fn from_system() -> Self {
        Self {
            profile: ProfileDirs::from_system(),
            program_dirs: ProgramDirs::from_env(),
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub artifacts: usize,
    pub failed: usize,
    pub edited_files: usize,
    pub cap_reached: bool,
    /// The backup folder, if anything was written to it.
    pub backup_dir: Option<PathBuf>,
}

/// Resolve the install directory: explicit and validated, or auto-detected.
pub fn resolve_game_dir(explicit: Option<&Path>, env: &Environment) -> Result<PathBuf> {
    match explicit {
        Some(dir) => {
            let dir = normalize(dir);
            if !is_game_dir(&dir) {
                return Err(RemoverError::InvalidGameDir(dir));
            }
            Ok(dir)
        }
        None => {
            let detectors = default_detectors(platform_locator(), env.program_dirs.clone());
            find_install_dir(&detectors).ok_or(RemoverError::GameDirNotFound)
        }
    }
}

/// Run the remover.
pub fn run(settings: &RunSettings, env: &Environment) -> Result<RunSummary> {
    let game_dir = resolve_game_dir(settings.game_dir.as_deref(), env)?;
    tracing::info!(game_dir = %game_dir.display(), "Using game directory");

    let roots = build_roots(Some(&game_dir), &settings.managers, &env.profile).into_vec();

    let backup_base = match &settings.backup_base {
        Some(base) => base.clone(),
        None => std::env::current_dir().map_err(|source| RemoverError::Io {
            path: PathBuf::from("."),
            source,
        })?,
    };
    let backup = BackupDir::new(&backup_base);

    print_banner(&game_dir, settings, &backup, &roots);

    let matcher = Matcher::new();

    let report = find_matches(&roots, settings.max_matches, &matcher);
    if report.cap_reached {
        println!(
            "\nWarning: stopped after {} match(es); results are partial.",
            settings.max_matches
        );
    }
    let matches = collapse_covered(&report.matches);

    let targets = find_text_targets(&roots);
    tracing::debug!(count = targets.len(), "Found text files to check");

    let editor = TextEditor::new(&matcher, &backup, settings.dry_run);
    let edits: Vec<EditOutcome> = targets
        .iter()
        .map(|path| editor.edit(path))
        .filter(|outcome| *outcome != EditOutcome::Unchanged)
        .collect();

    let mut summary = RunSummary {
        artifacts: matches.len(),
        cap_reached: report.cap_reached,
        edited_files: edits
            .iter()
            .filter(|e| matches!(e, EditOutcome::Edited { .. } | EditOutcome::WouldEdit { .. }))
            .count(),
        ..Default::default()
    };

    if matches.is_empty() && edits.is_empty() {
        println!("No NVMP artifacts found by signature scan, and no NVMP lines found in text files.");
        return Ok(summary);
    }

    if matches.is_empty() {
        println!("\nNo NVMP-named files/folders found to remove.");
    } else {
        let verb = if settings.dry_run { "Would remove" } else { "Removing" };
        println!("\n{verb} {} NVMP artifact(s):", matches.len());

        let remover = Remover::new(
            RemoveOptions {
                permanent: settings.permanent,
                dry_run: settings.dry_run,
            },
            Some(&backup),
        );
        for path in &matches {
            let size = format_size(item_size(path), BINARY);
            let (path, outcome) = remover.remove(path);
            if outcome.is_failure() {
                summary.failed += 1;
            }
            println!("  - {} ({size}) -> {outcome}", path.display());
        }
    }

    if !edits.is_empty() {
        println!("\nCleaned NVMP entries from text files:");
        for edit in &edits {
            if matches!(edit, EditOutcome::Failed { .. }) {
                summary.failed += 1;
            }
            println!("  - {edit}");
        }
    }

    println!("\nDONE.");
    if settings.dry_run {
        println!("[DRY RUN] Nothing was changed.");
    }
    if backup.is_created() {
        summary.backup_dir = Some(backup.path().to_path_buf());
        if settings.permanent {
            println!("Original copies of edited text files are here:\n  {}", backup.path().display());
        } else {
            println!("If you need to restore, your removed files are here:\n  {}", backup.path().display());
        }
    }

    Ok(summary)
}

fn print_banner(game_dir: &Path, settings: &RunSettings, backup: &BackupDir, roots: &[PathBuf]) {
    let mode = if settings.permanent {
        "PERMANENT DELETE"
    } else {
        "BACKUP+REMOVE"
    };

    println!("{}", "=".repeat(80));
    println!("NVMP REMOVER{}", if settings.dry_run { " [DRY RUN]" } else { "" });
    println!("Game dir: {}", game_dir.display());
    println!("Mode: {mode}");
    if !settings.permanent {
        println!("Backup folder: {}", backup.path().display());
    }
    println!("\nScan roots:");
    for root in roots {
        println!("  - {}", root.display());
    }
    println!("{}", "=".repeat(80));
}

/// Hint printed with [`RemoverError::GameDirNotFound`].
pub fn game_dir_hint() -> String {
    format!(
        "Run again with: --game \"<folder containing {GAME_EXECUTABLE}>\""
    )
}
