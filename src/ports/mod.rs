//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the board engine and an
//! external system (the project filesystem, version-control history).
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod vcs;

pub use filesystem::FileSystem;
pub use vcs::{VcsHistory, VcsUnavailable};
