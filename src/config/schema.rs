//! Configuration schema for altroot
//!
//! Configuration is stored at `~/.config/altroot/config.toml`

use crate::symlink::MAX_SYMLINKS;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Alternate root settings
    pub prefix: PrefixConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Alternate root settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixConfig {
    /// Alternate root; unset disables remapping
    pub root: Option<String>,

    /// Symbolic link hop bound
    pub max_symlinks: u32,
}

impl Default for PrefixConfig {
    fn default() -> Self {
        Self {
            root: None,
            max_symlinks: MAX_SYMLINKS,
        }
    }
}
