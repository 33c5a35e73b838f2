//! Error types for board loading.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that prevent a board from being built at all.
///
/// Everything else (malformed blocks, dangling dependencies, failing
/// completion sources) degrades locally and never surfaces here.
#[derive(Debug, Error)]
pub enum BoardError {
    /// None of the candidate planning documents exists.
    #[error("No planning document found. Looked for: {}", display_paths(.searched))]
    PlanNotFound {
        /// Every path that was searched, in search order.
        searched: Vec<PathBuf>,
    },

    /// The planning document exists but could not be read.
    #[error("Failed to read planning document {path}: {reason}")]
    PlanUnreadable {
        /// The document path.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {reason}")]
    ConfigRead {
        /// The config file path.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },

    /// The configuration file is not valid TOML for [`crate::config::BoardConfig`].
    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        /// The config file path.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}
