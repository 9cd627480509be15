//! Symbolic link following confined to the alternate root
//!
//! The kernel would resolve an absolute link target against the real `/`.
//! Once a lookup has entered the alternate tree it has to stay there, so
//! links are walked by hand: absolute targets are re-rooted under the
//! alternate root and relative targets are joined to the link's directory.

use crate::error::{AltrootError, AltrootResult};
use crate::probe::FsProbe;
use crate::root::{join_under, AlternateRoot};
use std::io;
use tracing::trace;

/// Link hop bound, matching `MAXSYMLINKS` in linux/namei.h
pub const MAX_SYMLINKS: u32 = 40;

/// Follow `path` until it is no longer a symbolic link.
///
/// `path` must already live under `root`. The hop counter is bumped before
/// each link is read, so the walk fails once it reaches `limit`. A path that
/// cannot be `lstat`ed is returned as is; whether it exists is the caller's
/// concern.
pub fn follow_symlinks<P: FsProbe + ?Sized>(
    root: &AlternateRoot,
    path: String,
    probe: &P,
    limit: u32,
) -> AltrootResult<String> {
    let mut path = path;
    let mut hops = 0u32;

    while probe.is_symlink(&path) {
        hops += 1;
        if hops >= limit {
            return Err(AltrootError::SymlinkLoop { path });
        }

        let target = match probe.read_link(&path) {
            Ok(target) => target,
            Err(e) => return Err(AltrootError::broken_link(path, e)),
        };
        let target = match target.into_os_string().into_string() {
            Ok(target) => target,
            Err(raw) => {
                let reason = format!("link target {:?} is not valid UTF-8", raw);
                return Err(AltrootError::broken_link(
                    path,
                    io::Error::new(io::ErrorKind::InvalidData, reason),
                ));
            }
        };

        let next = if target.starts_with('/') {
            root.join(&target)
        } else {
            let dir = path.rfind('/').map_or(".", |idx| &path[..idx]);
            join_under(dir, &target)
        };
        trace!(hop = hops, from = %path, to = %next, "followed symlink");
        path = next;
    }

    Ok(path)
}
