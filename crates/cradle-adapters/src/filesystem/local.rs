//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use cradle_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CradleError, CradleResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> CradleResult<()> {
        std::fs::create_dir_all(path).map_err(|e| write_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> CradleResult<()> {
        std::fs::write(path, content).map_err(|e| write_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> CradleResult<String> {
        std::fs::read_to_string(path).map_err(|e| {
            ApplicationError::FileRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn write_error(path: &Path, e: io::Error, operation: &str) -> CradleError {
    ApplicationError::FileWrite {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
