//! Read-only filesystem queries used during resolution
//!
//! Resolution needs exactly three questions answered: is this node a
//! symbolic link (without following it), what does the link point to, and
//! does a path exist at all. `FsProbe` is the seam that lets tests count or
//! fake those queries.

use std::io;
use std::path::PathBuf;

/// Filesystem queries performed by the resolver
pub trait FsProbe: Send + Sync {
    /// `lstat` the path; false if the query fails or the node is not a link
    fn is_symlink(&self, path: &str) -> bool;

    /// Read the target of a symbolic link
    fn read_link(&self, path: &str) -> io::Result<PathBuf>;

    /// Pure existence check following links, no permission test
    fn exists(&self, path: &str) -> bool;
}

/// Probe backed by the host filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl FsProbe for HostFs {
    fn is_symlink(&self, path: &str) -> bool {
        std::fs::symlink_metadata(path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn read_link(&self, path: &str) -> io::Result<PathBuf> {
        std::fs::read_link(path)
    }

    fn exists(&self, path: &str) -> bool {
        std::fs::metadata(path).is_ok()
    }
}

impl<P: FsProbe + ?Sized> FsProbe for &P {
    fn is_symlink(&self, path: &str) -> bool {
        (**self).is_symlink(path)
    }

    fn read_link(&self, path: &str) -> io::Result<PathBuf> {
        (**self).read_link(path)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Host probe that counts every query
    #[derive(Debug, Default)]
    pub struct CountingFs {
        pub lstats: AtomicUsize,
        pub readlinks: AtomicUsize,
        pub exists_checks: AtomicUsize,
    }

    impl CountingFs {
        pub fn total(&self) -> usize {
            self.lstats.load(Ordering::SeqCst)
                + self.readlinks.load(Ordering::SeqCst)
                + self.exists_checks.load(Ordering::SeqCst)
        }
    }

    impl FsProbe for CountingFs {
        fn is_symlink(&self, path: &str) -> bool {
            self.lstats.fetch_add(1, Ordering::SeqCst);
            HostFs.is_symlink(path)
        }

        fn read_link(&self, path: &str) -> io::Result<PathBuf> {
            self.readlinks.fetch_add(1, Ordering::SeqCst);
            HostFs.read_link(path)
        }

        fn exists(&self, path: &str) -> bool {
            self.exists_checks.fetch_add(1, Ordering::SeqCst);
            HostFs.exists(path)
        }
    }

    /// Host probe whose links can be seen but never read
    #[derive(Debug, Default)]
    pub struct UnreadableLinks;

    impl FsProbe for UnreadableLinks {
        fn is_symlink(&self, path: &str) -> bool {
            HostFs.is_symlink(path)
        }

        fn read_link(&self, _path: &str) -> io::Result<PathBuf> {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        }

        fn exists(&self, path: &str) -> bool {
            HostFs.exists(path)
        }
    }
}
