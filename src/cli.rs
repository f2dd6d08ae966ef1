use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// NVMP Remover - removes Fallout New Vegas Multiplayer leftovers while leaving other mods alone
#[derive(Parser, Debug)]
#[command(name = "nvmp-remover")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the Fallout New Vegas game directory (auto-detected if omitted)
    #[arg(long, value_name = "DIR")]
    pub game: Option<PathBuf>,

    /// Mod Organizer 2 base directory
    #[arg(long, value_name = "DIR")]
    pub mo2: Option<PathBuf>,

    /// Vortex mods/staging directory
    #[arg(long, value_name = "DIR")]
    pub vortex: Option<PathBuf>,

    /// Where to create the backup folder (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Permanently delete instead of moving into the backup folder
    #[arg(long)]
    pub delete: bool,

    /// Safety cap on the number of matched items
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_matches: Option<u64>,

    /// Show what would be removed without touching anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["nvmp-remover"]);
        assert!(cli.game.is_none());
        assert!(!cli.delete);
        assert!(!cli.dry_run);
        assert!(cli.max_matches.is_none());
    }

    #[test]
    fn parse_all_options() {
        let cli = Cli::parse_from([
            "nvmp-remover",
            "--game",
            "/games/fnv",
            "--mo2",
            "/mo2",
            "--vortex",
            "/vortex/mods",
            "--backup-dir",
            "/backups",
            "--delete",
            "--max-matches",
            "5",
        ]);
        assert_eq!(cli.game, Some(PathBuf::from("/games/fnv")));
        assert_eq!(cli.mo2, Some(PathBuf::from("/mo2")));
        assert_eq!(cli.vortex, Some(PathBuf::from("/vortex/mods")));
        assert_eq!(cli.backup_dir, Some(PathBuf::from("/backups")));
        assert!(cli.delete);
        assert_eq!(cli.max_matches, Some(5));
    }

    #[test]
    fn zero_cap_is_rejected() {
        assert!(Cli::try_parse_from(["nvmp-remover", "--max-matches", "0"]).is_err());
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::parse_from(["nvmp-remover", "-vvv"]);
        assert_eq!(cli.verbose, 3);
    }
}
