//! Recording session shared by the recording adapters of one run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Owns the recorder that every recording adapter of a run appends to.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Starts a session writing to `<dir>/<timestamp>.cassette.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette for the same timestamp already exists.
    pub fn new(dir: &Path, root: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = dir.join(format!("{timestamp}.cassette.yaml"));
        if path.exists() {
            return Err(format!("Cassette already exists: {}", path.display()));
        }
        let recorder = CassetteRecorder::new(
            path,
            format!("planboard-{timestamp}"),
            root.display().to_string(),
        );
        Ok(Self { recorder: Arc::new(Mutex::new(recorder)) })
    }

    /// Handle for a recording adapter.
    #[must_use]
    pub fn recorder(&self) -> Arc<Mutex<CassetteRecorder>> {
        Arc::clone(&self.recorder)
    }

    /// Writes the cassette and returns its path.
    ///
    /// All adapters holding a recorder handle must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds the recorder or the file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapters still hold the recorder".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}
