//! CLI argument definitions using clap derive

use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// altroot - remap absolute paths into an alternate root
///
/// Looks up absolute paths under an alternate filesystem tree, following
/// symbolic links inside that tree, and reports where each one resolves.
#[derive(Parser, Debug)]
#[command(name = "altroot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ALTROOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .altroot.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,

    /// Alternate root (overrides the config file)
    #[arg(short = 'L', long, global = true, value_name = "DIR", env = "ALTROOT_PREFIX")]
    pub prefix: Option<String>,

    /// Whether `prefix` was taken from the environment rather than the flag
    #[arg(skip)]
    pub prefix_from_env: bool,
}

impl Cli {
    /// Parse the process arguments, exiting with a usage error on failure
    pub fn parse_args() -> Self {
        let matches = Self::command().get_matches();
        Self::from_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// Build from parsed matches, recording where the prefix came from
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut cli = Self::from_arg_matches(matches)?;
        cli.prefix_from_env = matches.value_source("prefix") == Some(ValueSource::EnvVariable);
        Ok(cli)
    }

    /// The prefix split into (flag, environment) for precedence handling
    pub fn prefix_sources(&self) -> (Option<&str>, Option<&str>) {
        if self.prefix_from_env {
            (None, self.prefix.as_deref())
        } else {
            (self.prefix.as_deref(), None)
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve absolute paths against the alternate root
    Resolve(ResolveArgs),

    /// Show the effective alternate root
    Status,

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Print shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Paths to resolve (relative paths are passed through)
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Print cache statistics after resolving
    #[arg(long)]
    pub stats: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., prefix.root)
        key: String,
        /// Value to set
        value: String,
        /// Write to project-local .altroot.toml instead of global config
        #[arg(long)]
        local: bool,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}

/// Output format for the resolve command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Resolved path only, one per line
    Plain,
}
