//! Filesystem port for reading planning documents and probing artifacts.

use std::path::Path;

/// Read-only view of the project filesystem.
///
/// Paths are interpreted by the implementation; the live adapter resolves
/// relative paths against the project root.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;
}
