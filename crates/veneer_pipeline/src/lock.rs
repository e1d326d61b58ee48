//! Advisory per-coordinate run lock.

use std::fs::File;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::PipelineError;

/// Exclusive advisory lock over one coordinate's working tree.
///
/// Held for the duration of a run; released on drop (or process exit).
/// A second run against the same coordinate fails fast instead of
/// corrupting shared state.
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Acquires the lock, failing immediately when it is already held.
    pub fn acquire(path: &Path) -> Result<Self, PipelineError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
        file.try_lock_exclusive().map_err(|_| PipelineError::Locked {
            path: path.to_path_buf(),
        })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// The lockfile path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
