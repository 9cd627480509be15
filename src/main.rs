//! altroot - alternate root path remapping
//!
//! CLI entry point that dispatches to subcommands.

use altroot::cli::{Cli, Commands};
use altroot::config::{ConfigManager, Settings};
use altroot::error::{AltrootError, AltrootResult};
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AltrootResult<()> {
    let cli = Cli::parse_args();

    // Completions don't need config loading
    if let Commands::Completions(args) = &cli.command {
        altroot::cli::commands::completions(args);
        return Ok(());
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    // Find local config unless --no-local is set
    let local_config_path = if cli.no_local {
        None
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| AltrootError::io("getting current directory", e))?;
        ConfigManager::find_local_config(&cwd)
    };

    let config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    init_logging(cli.verbose, &config);
    if let Some(ref path) = local_config_path {
        debug!("Using local config: {}", path.display());
    }

    let (flag_prefix, env_prefix) = cli.prefix_sources();
    let settings = Settings::new(config, flag_prefix, env_prefix);

    match cli.command {
        Commands::Completions(_) => unreachable!("Completions handled above"),
        Commands::Resolve(args) => altroot::cli::commands::resolve(args, &settings).await,
        Commands::Status => altroot::cli::commands::status(&settings, config_manager.path()),
        Commands::Config(args) => {
            altroot::cli::commands::config(args, &settings.config, &config_manager).await
        }
    }
}

/// Logs go to stderr: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &altroot::config::Config) {
    let level = if config.general.verbose {
        verbose.max(1)
    } else {
        verbose
    };
    let filter = match level {
        0 => EnvFilter::new("altroot=warn"),
        1 => EnvFilter::new("altroot=info"),
        _ => EnvFilter::new("altroot=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.with_target(false).without_time().init();
    }
}
