//! Replaying adapter for the `VcsHistory` port.

use std::sync::Mutex;

use crate::cassette::replayer::{decode_result, CassetteReplayer};
use crate::ports::vcs::{VcsHistory, VcsUnavailable};

/// Replays recorded history queries from a cassette.
pub struct ReplayingVcsHistory {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingVcsHistory {
    /// Creates a new replaying history from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl VcsHistory for ReplayingVcsHistory {
    fn recent_history(&self, _lookback: usize) -> Result<String, VcsUnavailable> {
        let output = self
            .replayer
            .lock()
            .expect("replayer lock poisoned")
            .next_output("vcs", "recent_history");
        decode_result(output, "vcs::recent_history").map_err(VcsUnavailable::new)
    }
}
