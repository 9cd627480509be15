//! Alternate root configuration
//!
//! The alternate root is fixed once, when a resolver is built, and every
//! remapped path is derived from it by plain string joining.

use crate::error::{AltrootError, AltrootResult};
use std::fmt;
use std::io;
use tracing::debug;

/// Absolute path of the alternate filesystem tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateRoot(String);

impl AlternateRoot {
    /// Interpret a configured prefix.
    ///
    /// Returns `Ok(None)` for `""` and `"/"`, which disable remapping.
    /// Absolute prefixes are kept verbatim; anything else is taken relative
    /// to the current working directory at call time.
    pub fn from_prefix(prefix: &str) -> AltrootResult<Option<Self>> {
        if prefix.is_empty() || prefix == "/" {
            debug!("Prefix {:?} disables remapping", prefix);
            return Ok(None);
        }

        if prefix.starts_with('/') {
            return Ok(Some(Self(prefix.to_string())));
        }

        let cwd = std::env::current_dir()
            .map_err(AltrootError::CurrentDir)?
            .into_os_string()
            .into_string()
            .map_err(|raw| {
                AltrootError::CurrentDir(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{:?} is not valid UTF-8", raw),
                ))
            })?;
        let root = join_under(&cwd, prefix);
        debug!("Relative prefix {:?} anchored at {}", prefix, root);
        Ok(Some(Self(root)))
    }

    /// The root as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the candidate path for `name` under this root
    pub fn join(&self, name: &str) -> String {
        join_under(&self.0, name)
    }
}

impl fmt::Display for AlternateRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AlternateRoot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Join two path strings with exactly one `/` at the seam.
///
/// Separators inside either part are kept as written, and a trailing `/`
/// on `rest` survives (`"/alt" + "/"` gives `"/alt/"`).
pub fn join_under(base: &str, rest: &str) -> String {
    let base = base.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');
    let mut joined = String::with_capacity(base.len() + rest.len() + 1);
    joined.push_str(base);
    joined.push('/');
    joined.push_str(rest);
    joined
}
