//! The board engine: planning document in, ordered ready tasks out.
//!
//! - `tokenizer`: line classification and phase sections.
//! - `extract`: task records for both document dialects.
//! - `graph`: explicit and implicit prerequisites.
//! - `completion`: evidence that tasks are done.
//! - `readiness`: which tasks can start now.
//! - `load`: wiring the above against a [`ServiceContext`](crate::context::ServiceContext).

pub mod completion;
pub mod extract;
pub mod graph;
pub mod load;
pub mod readiness;
pub mod record;
pub mod tokenizer;

pub use load::{Board, BoardSnapshot};
