//! Board configuration loaded from `planboard.toml`.
//!
//! Every field has a default, so a project without a config file gets the
//! conventional document names and no artifact mapping.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::board::record::{Dialect, TaskId};
use crate::error::BoardError;
use crate::ports::FileSystem;

/// Default config file name, resolved against the project root.
pub const CONFIG_FILE: &str = "planboard.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Where to find the planning document.
    #[serde(default)]
    pub plan: PlanConfig,

    /// Completion signal settings.
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Task id to the file or directory whose existence marks it complete.
    #[serde(default)]
    pub artifacts: BTreeMap<TaskId, PathBuf>,
}

/// Planning document lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Documents tried in order; the first one that exists is used.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<PlanCandidate>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self { candidates: default_candidates() }
    }
}

/// One candidate planning document and the dialect it is written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCandidate {
    /// Path relative to the project root.
    pub path: PathBuf,
    /// Dialect of the document.
    pub dialect: Dialect,
}

fn default_candidates() -> Vec<PlanCandidate> {
    vec![
        PlanCandidate { path: PathBuf::from("DEVELOPMENT-PLAN.md"), dialect: Dialect::Heading },
        PlanCandidate {
            path: PathBuf::from("TEST_IMPLEMENTATION_PLAN.md"),
            dialect: Dialect::Checkbox,
        },
        PlanCandidate { path: PathBuf::from("TEST-COVERAGE-PLAN.md"), dialect: Dialect::Checkbox },
    ]
}

/// How progress notes are matched against task ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotesMatching {
    /// Id and "completed" anywhere in the document.
    #[default]
    Document,
    /// Id and "completed" on the same line.
    Line,
}

/// Completion signal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Progress-notes document, relative to the project root.
    #[serde(default = "default_notes")]
    pub notes: PathBuf,

    /// Notes matching strategy.
    #[serde(default)]
    pub notes_matching: NotesMatching,

    /// Number of recent commits whose subjects are scanned.
    #[serde(default = "default_commit_lookback")]
    pub commit_lookback: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            notes: default_notes(),
            notes_matching: NotesMatching::default(),
            commit_lookback: default_commit_lookback(),
        }
    }
}

fn default_notes() -> PathBuf {
    PathBuf::from("SESSION_NOTES.md")
}

fn default_commit_lookback() -> usize {
    50
}

impl BoardConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ConfigParse`] if the text is not a valid config.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, BoardError> {
        toml::from_str(text)
            .map_err(|source| BoardError::ConfigParse { path: path.to_path_buf(), source })
    }

    /// Loads the config at `path` through the filesystem port, or defaults
    /// when `required` is false and the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is required but missing, unreadable, or invalid.
    pub fn load(fs: &dyn FileSystem, path: &Path, required: bool) -> Result<Self, BoardError> {
        if !required && !fs.exists(path) {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        let text = fs.read_to_string(path).map_err(|e| BoardError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&text, path)
    }
}
