//! Single-instance guard.
//!
//! Only one hyprpill may own the overlay per user session.  The guard
//! is an advisory exclusive `flock` on a file under the user cache dir:
//! the lock's existence is all that matters, its content is never read.
//! It is held for the process lifetime and released implicitly on exit,
//! so a crashed instance never leaves a stale lock behind.

use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Holds the advisory lock for as long as it is alive.
pub struct InstanceLock {
    _lock: Flock<File>,
}

/// Errors from acquiring the instance lock.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    /// Another instance already holds the lock.  Expected and normal;
    /// callers should exit cleanly.
    #[error("lock is held by another process")]
    Contended,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Default lock path: `$XDG_CACHE_HOME/hyprpill/lock`.
fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CACHE_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.cache", home)
    });
    PathBuf::from(base).join("hyprpill").join("lock")
}

impl InstanceLock {
    /// Acquire the per-user instance lock, creating the lock file (and
    /// its directory) if needed.
    pub fn acquire() -> Result<Self, LockError> {
        Self::acquire_at(&default_path())
    }

    /// Acquire an exclusive non-blocking lock on `path`.
    pub fn acquire_at(path: &Path) -> Result<Self, LockError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
            Ok(lock) => Ok(Self { _lock: lock }),
            Err((_, Errno::EWOULDBLOCK)) => Err(LockError::Contended),
            Err((_, errno)) => Err(LockError::Io(errno.into())),
        }
    }
}
