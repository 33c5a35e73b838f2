//! Recording adapter for the `VcsHistory` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::vcs::{VcsHistory, VcsUnavailable};

/// Records history queries while delegating to an inner implementation.
pub struct RecordingVcsHistory {
    inner: Box<dyn VcsHistory>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingVcsHistory {
    /// Creates a new recording adapter wrapping the given implementation.
    pub fn new(inner: Box<dyn VcsHistory>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct LookbackInput {
    lookback: usize,
}

impl VcsHistory for RecordingVcsHistory {
    fn recent_history(&self, lookback: usize) -> Result<String, VcsUnavailable> {
        let result = self.inner.recent_history(lookback);
        let input = LookbackInput { lookback };
        record_result(&self.recorder, "vcs", "recent_history", &input, &result);
        result
    }
}
