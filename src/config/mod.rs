//! Configuration management for altroot

pub mod schema;

pub use schema::Config;

use crate::error::{AltrootError, AltrootResult};
use crate::probe::HostFs;
use crate::resolver::Resolver;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Project-local config file name
pub const LOCAL_CONFIG_FILE: &str = ".altroot.toml";

/// Environment variable naming the alternate root
pub const PREFIX_ENV: &str = "ALTROOT_PREFIX";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("altroot")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub async fn load(&self) -> AltrootResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> AltrootResult<Config> {
        parse_config(read_toml(path).await?, path)
    }

    /// Load the global config with a project-local file layered on top.
    ///
    /// Keys set in the local file win; tables are merged key by key.
    pub async fn load_merged(&self, local: Option<&Path>) -> AltrootResult<Config> {
        let Some(local) = local else {
            return self.load().await;
        };

        let mut merged = if self.config_path.exists() {
            let global = read_toml(&self.config_path).await?;
            // Errors in the global file must name the global file
            parse_config(global.clone(), &self.config_path)?;
            global
        } else {
            toml::Value::Table(toml::map::Map::new())
        };
        merge_toml(&mut merged, read_toml(local).await?);

        parse_config(merged, local)
    }

    /// Walk up from `start` looking for a project-local config file
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> AltrootResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            AltrootError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> AltrootResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AltrootError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the effective alternate root came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixSource {
    Flag,
    Environment,
    Config,
    Unset,
}

impl PrefixSource {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Flag => "--prefix flag",
            Self::Environment => PREFIX_ENV,
            Self::Config => "config file",
            Self::Unset => "not set",
        }
    }
}

/// Pick the prefix to use: flag, then environment, then config file.
///
/// An empty string still counts as a choice, so `--prefix ""` disables a
/// root set further down the chain.
pub fn select_prefix(
    flag: Option<&str>,
    env: Option<&str>,
    config: &Config,
) -> (String, PrefixSource) {
    if let Some(flag) = flag {
        return (flag.to_string(), PrefixSource::Flag);
    }
    if let Some(env) = env {
        return (env.to_string(), PrefixSource::Environment);
    }
    match &config.prefix.root {
        Some(root) => (root.clone(), PrefixSource::Config),
        None => (String::new(), PrefixSource::Unset),
    }
}

/// Effective settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub prefix: String,
    pub source: PrefixSource,
}

impl Settings {
    pub fn new(config: Config, flag: Option<&str>, env: Option<&str>) -> Self {
        let (prefix, source) = select_prefix(flag, env, &config);
        debug!("Prefix {:?} from {}", prefix, source.describe());
        Self {
            config,
            prefix,
            source,
        }
    }

    /// Build a host-filesystem resolver from these settings
    pub fn build_resolver(&self) -> AltrootResult<Resolver> {
        Resolver::with_options(&self.prefix, HostFs, self.config.prefix.max_symlinks)
    }
}

async fn read_toml(path: &Path) -> AltrootResult<toml::Value> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AltrootError::io(format!("reading config from {}", path.display()), e))?;

    content
        .parse()
        .map_err(|e: toml::de::Error| AltrootError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn parse_config(value: toml::Value, path: &Path) -> AltrootResult<Config> {
    value
        .try_into()
        .map_err(|e: toml::de::Error| AltrootError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
