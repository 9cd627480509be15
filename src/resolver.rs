//! Path resolver
//!
//! `Resolver::resolve` is the entry point consumers call before opening a
//! file by absolute path. It never fails: when there is no usable target
//! under the alternate root, the requested path comes back unchanged.

use crate::cache::{CacheStats, Resolution, ResolutionCache};
use crate::error::{AltrootError, AltrootResult};
use crate::probe::{FsProbe, HostFs};
use crate::root::AlternateRoot;
use crate::symlink::{follow_symlinks, MAX_SYMLINKS};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, info, trace, warn};

/// State that only exists when remapping is enabled
struct Remap {
    root: AlternateRoot,
    cache: ResolutionCache,
    max_symlinks: u32,
}

/// Remaps absolute paths into an alternate root, memoizing every outcome
pub struct Resolver<P = HostFs> {
    remap: Option<Remap>,
    probe: P,
}

impl Resolver<HostFs> {
    /// Resolver that passes every path through
    pub fn disabled() -> Self {
        Self {
            remap: None,
            probe: HostFs,
        }
    }

    /// Build a resolver for `prefix` against the host filesystem.
    ///
    /// `""` and `"/"` give a disabled resolver. Relative prefixes are
    /// anchored at the current working directory now, not at lookup time.
    pub fn new(prefix: &str) -> AltrootResult<Self> {
        Self::with_probe(prefix, HostFs)
    }
}

impl<P: FsProbe> Resolver<P> {
    pub fn with_probe(prefix: &str, probe: P) -> AltrootResult<Self> {
        Self::with_options(prefix, probe, MAX_SYMLINKS)
    }

    /// Build a resolver with a custom symlink hop bound
    pub fn with_options(prefix: &str, probe: P, max_symlinks: u32) -> AltrootResult<Self> {
        if max_symlinks == 0 {
            return Err(AltrootError::User(
                "max_symlinks must be at least 1".to_string(),
            ));
        }

        let remap = AlternateRoot::from_prefix(prefix)?.map(|root| Remap {
            root,
            cache: ResolutionCache::new(),
            max_symlinks,
        });

        match &remap {
            Some(remap) => info!("Remapping absolute paths under {}", remap.root),
            None => info!("Path remapping disabled"),
        }

        Ok(Self { remap, probe })
    }

    /// Whether an alternate root is configured
    pub fn is_enabled(&self) -> bool {
        self.remap.is_some()
    }

    pub fn root(&self) -> Option<&AlternateRoot> {
        self.remap.as_ref().map(|remap| &remap.root)
    }

    pub fn max_symlinks(&self) -> Option<u32> {
        self.remap.as_ref().map(|remap| remap.max_symlinks)
    }

    /// Cache counters; all zero when disabled
    pub fn stats(&self) -> CacheStats {
        self.remap
            .as_ref()
            .map(|remap| remap.cache.stats())
            .unwrap_or_default()
    }

    /// Number of distinct absolute paths resolved so far
    pub fn cached(&self) -> usize {
        self.remap.as_ref().map_or(0, |remap| remap.cache.len())
    }

    /// Map `name` to the path that should actually be opened
    pub fn resolve<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self.lookup(name) {
            Resolution::Remapped(path) => Cow::Owned(path),
            Resolution::Unchanged => Cow::Borrowed(name),
        }
    }

    /// Resolve `name` and report whether it was redirected
    pub fn lookup(&self, name: &str) -> Resolution {
        let Some(remap) = &self.remap else {
            return Resolution::Unchanged;
        };
        // Relative paths, including "", are never remapped.
        if !name.starts_with('/') {
            return Resolution::Unchanged;
        }

        let mut computed = false;
        let resolution = remap.cache.get_or_insert_with(name, || {
            computed = true;
            match self.locate(remap, name) {
                Ok(path) => {
                    debug!("Remapped {} -> {}", name, path);
                    Resolution::Remapped(path)
                }
                Err(e) if e.is_resolution_failure() => {
                    debug!("Passing {} through: {}", name, e);
                    Resolution::Unchanged
                }
                Err(e) => {
                    warn!("Unexpected failure resolving {}: {}", name, e);
                    Resolution::Unchanged
                }
            }
        });
        if !computed {
            trace!("Cache hit for {}", name);
        }
        resolution
    }

    fn locate(&self, remap: &Remap, name: &str) -> AltrootResult<String> {
        let candidate = remap.root.join(name);
        let path = follow_symlinks(&remap.root, candidate, &self.probe, remap.max_symlinks)?;
        if self.probe.exists(&path) {
            Ok(path)
        } else {
            Err(AltrootError::NotFound(path))
        }
    }
}

impl<P> fmt::Debug for Resolver<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.remap {
            Some(remap) => f
                .debug_struct("Resolver")
                .field("root", &remap.root)
                .field("max_symlinks", &remap.max_symlinks)
                .field("cached", &remap.cache.len())
                .finish(),
            None => f.debug_struct("Resolver").field("root", &None::<()>).finish(),
        }
    }
}
