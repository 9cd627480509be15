//! Error types for altroot
//!
//! All modules use `AltrootResult<T>` as their return type. The resolution
//! variants never cross `Resolver::resolve`; they are collapsed into
//! passthrough there.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for altroot operations
pub type AltrootResult<T> = Result<T, AltrootError>;

/// All errors that can occur in altroot
#[derive(Error, Debug)]
pub enum AltrootError {
    // Resolution errors
    #[error("Too many levels of symbolic links at {path}")]
    SymlinkLoop { path: String },

    #[error("Cannot read symbolic link {path}: {source}")]
    BrokenLink {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No such path under alternate root: {0}")]
    NotFound(String),

    // Root configuration errors
    #[error("Cannot determine current directory for relative prefix: {0}")]
    CurrentDir(#[source] std::io::Error),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl AltrootError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a broken link error
    pub fn broken_link(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::BrokenLink {
            path: path.into(),
            source,
        }
    }

    /// Whether this error belongs to the resolution taxonomy that
    /// `Resolver::resolve` collapses into passthrough
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Self::SymlinkLoop { .. } | Self::BrokenLink { .. } | Self::NotFound(_)
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CurrentDir(_) => Some("Use an absolute --prefix"),
            Self::ConfigInvalid { .. } => Some("Run: altroot config init --force"),
            _ => None,
        }
    }
}
