//! Scoped scratch directory for a single run.
//!
//! The directory and everything inside it are removed when the workspace is
//! dropped, on success and error paths alike.
use crate::error::{GridError, Result};
use std::path::Path;
use tempfile::TempDir;

pub struct RunWorkspace {
    dir: TempDir,
}

impl RunWorkspace {
    /// Create a fresh directory under the system temp location.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("manuscript-grid-")
            .tempdir()
            .map_err(|e| GridError::io(std::env::temp_dir(), e))?;
        log::debug!("run workspace at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
