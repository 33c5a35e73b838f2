//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use crate::cassette::replayer::{decode_result, CassetteReplayer};
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next(&self, method: &str) -> serde_json::Value {
        self.replayer.lock().expect("replayer lock poisoned").next_output("fs", method)
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(decode_result(self.next("read_to_string"), "fs::read_to_string")?)
    }

    fn exists(&self, _path: &Path) -> bool {
        self.next("exists").as_bool().expect("fs::exists: expected boolean output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_fs(interactions: Vec<Interaction>) -> ReplayingFileSystem {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            root: ".".into(),
            interactions,
        };
        ReplayingFileSystem::new(CassetteReplayer::for_port(&cassette, "fs"))
    }

    #[test]
    fn replays_read_to_string() {
        let fs = make_fs(vec![Interaction {
            seq: 0,
            port: "fs".into(),
            method: "read_to_string".into(),
            input: json!({"path": "PLAN.md"}),
            output: json!({"ok": "### Phase 0: Setup\n"}),
        }]);
        assert_eq!(fs.read_to_string(Path::new("PLAN.md")).unwrap(), "### Phase 0: Setup\n");
    }

    #[test]
    fn replays_read_error() {
        let fs = make_fs(vec![Interaction {
            seq: 0,
            port: "fs".into(),
            method: "read_to_string".into(),
            input: json!({"path": "/missing"}),
            output: json!({"err": "file not found"}),
        }]);
        let err = fs.read_to_string(Path::new("/missing")).unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn replays_exists() {
        let fs = make_fs(vec![Interaction {
            seq: 0,
            port: "fs".into(),
            method: "exists".into(),
            input: json!({"path": "SESSION_NOTES.md"}),
            output: json!(false),
        }]);
        assert!(!fs.exists(Path::new("SESSION_NOTES.md")));
    }
}
