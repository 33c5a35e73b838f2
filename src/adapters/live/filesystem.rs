//! Live filesystem adapter using `std::fs`.

use std::path::{Path, PathBuf};

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
///
/// Relative paths are resolved against `root`; absolute paths are used as-is.
pub struct LiveFileSystem {
    root: PathBuf,
}

impl LiveFileSystem {
    /// Creates an adapter rooted at the given project directory.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(self.resolve(path))?)
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }
}
