use anyhow::Result;
use clap::{CommandFactory, Parser};

use nvmp_remover::cli::Cli;
use nvmp_remover::commands::remove::{self, Environment, RunSettings};
use nvmp_remover::config::Config;
use nvmp_remover::error::{RemoverError, EXIT_CONFIG};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        return Ok(());
    }

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    if !cfg!(windows) && !cli.quiet {
        println!("Warning: This tool is intended for Windows. Continuing anyway.\n");
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(EXIT_CONFIG);
        }
    };

    tracing::debug!(?config, "Loaded configuration");

    let settings = RunSettings::resolve(&cli, &config);
    tracing::info!(?settings, "Starting removal");

    match remove::run(&settings, &Environment::from_system()) {
        Ok(summary) => {
            tracing::info!(?summary, "Finished");
            Ok(())
        }
        Err(err) => {
            eprintln!("ERROR: {err}");
            if matches!(err, RemoverError::GameDirNotFound) {
                eprintln!("{}", remove::game_dir_hint());
            }
            std::process::exit(err.exit_code());
        }
    }
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nvmp_remover={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
