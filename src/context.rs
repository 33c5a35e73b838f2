//! Service context bundling the port trait objects a board run needs.

use std::path::Path;

use crate::adapters::live::{LiveFileSystem, LiveGitHistory};
use crate::adapters::recording::{RecordingFileSystem, RecordingVcsHistory};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingVcsHistory};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::{FileSystem, VcsHistory};

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// Project filesystem.
    pub fs: Box<dyn FileSystem>,
    /// Version-control history.
    pub vcs: Box<dyn VcsHistory>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, vcs: Box<dyn VcsHistory>) -> Self {
        Self { fs, vcs }
    }

    /// Creates a live context rooted at `root`.
    #[must_use]
    pub fn live(root: &Path) -> Self {
        Self { fs: Box::new(LiveFileSystem::new(root)), vcs: Box::new(LiveGitHistory::new(root)) }
    }

    /// Creates a live context whose interactions are appended to `session`.
    ///
    /// The context must be dropped before the session is finished.
    #[must_use]
    pub fn recording(root: &Path, session: &RecordingSession) -> Self {
        Self {
            fs: Box::new(RecordingFileSystem::new(
                Box::new(LiveFileSystem::new(root)),
                session.recorder(),
            )),
            vcs: Box::new(RecordingVcsHistory::new(
                Box::new(LiveGitHistory::new(root)),
                session.recorder(),
            )),
        }
    }

    /// Creates a context served entirely from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        tracing::debug!(
            cassette = %cassette.name,
            interactions = cassette.interactions.len(),
            "replaying cassette"
        );
        Ok(Self {
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::for_port(&cassette, "fs"))),
            vcs: Box::new(ReplayingVcsHistory::new(CassetteReplayer::for_port(&cassette, "vcs"))),
        })
    }
}
