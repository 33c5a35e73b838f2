//! Replaying adapters that serve recorded interactions.

pub mod filesystem;
pub mod vcs;

pub use filesystem::ReplayingFileSystem;
pub use vcs::ReplayingVcsHistory;
