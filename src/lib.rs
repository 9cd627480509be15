//! altroot - alternate root path remapping
//!
//! Redirects absolute path lookups into an alternate filesystem tree, the
//! way a user-mode emulator finds a guest's libraries under a sysroot.
//! Symbolic links met under the alternate root are resolved against that
//! root, and every outcome is cached for the life of the resolver.
//!
//! ```no_run
//! use altroot::Resolver;
//!
//! let resolver = Resolver::new("/usr/gnemul/i386-linux")?;
//! let path = resolver.resolve("/lib/libc.so.6");
//! # Ok::<(), altroot::AltrootError>(())
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod probe;
pub mod resolver;
pub mod root;
pub mod symlink;
pub mod ui;

pub use cache::{CacheStats, Resolution};
pub use error::{AltrootError, AltrootResult};
pub use probe::{FsProbe, HostFs};
pub use resolver::Resolver;
pub use root::AlternateRoot;
