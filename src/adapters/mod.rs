//! Adapter implementations of the port traits.
//!
//! - `live`: real disk and `git` access.
//! - `recording`: wraps live adapters and appends every call to a cassette.
//! - `replaying`: serves a cassette back without touching disk or `git`.

#[cfg(test)]
pub(crate) mod memory;

pub mod live;
pub mod recording;
pub mod replaying;
