//! In-memory adapters for unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::ports::{FileSystem, VcsHistory, VcsUnavailable};

/// Filesystem backed by a map of path to contents.
#[derive(Default)]
pub(crate) struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub(crate) fn with(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(PathBuf::from(path), contents.to_string());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no such file: {}", path.display()).into())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

/// History that always returns the same text, or is unavailable.
pub(crate) struct StaticVcsHistory(pub(crate) Result<String, VcsUnavailable>);

impl VcsHistory for StaticVcsHistory {
    fn recent_history(&self, _lookback: usize) -> Result<String, VcsUnavailable> {
        self.0.clone()
    }
}

/// Context over `fs` with the given history text, or no VCS when `None`.
pub(crate) fn context(fs: MemoryFileSystem, history: Option<&str>) -> ServiceContext {
    let vcs = match history {
        Some(text) => StaticVcsHistory(Ok(text.to_string())),
        None => StaticVcsHistory(Err(VcsUnavailable::new("not a git repository"))),
    };
    ServiceContext::new(Box::new(fs), Box::new(vcs))
}
