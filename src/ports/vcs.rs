//! Version-control port for reading recent history.

use thiserror::Error;

/// Version control could not be queried (tool missing, not a repository,
/// non-zero exit). Callers treat this as "no evidence", never as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("version control unavailable: {reason}")]
pub struct VcsUnavailable {
    /// What went wrong, for debug logging.
    pub reason: String,
}

impl VcsUnavailable {
    /// Creates an unavailability marker with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Read-only access to recent version-control activity.
pub trait VcsHistory: Send + Sync {
    /// Returns branch names followed by the subjects of the last `lookback`
    /// commits, one per line.
    ///
    /// # Errors
    ///
    /// Returns [`VcsUnavailable`] when no history can be read at all.
    fn recent_history(&self, lookback: usize) -> Result<String, VcsUnavailable>;
}
