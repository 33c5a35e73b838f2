//! Completion signals merged from version control, artifacts and notes.
//!
//! Each [`CompletionSource`] reports the task ids it has evidence for. The
//! [`CompletionOracle`] runs every source, unions the results and keeps the
//! evidence per id. A failing source is logged and contributes nothing.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use super::record::{TaskId, TaskRecord};
use crate::config::{BoardConfig, NotesMatching};
use crate::context::ServiceContext;

/// Keyword that marks a task as done in the progress notes.
pub const COMPLETED_KEYWORD: &str = "completed";

/// Kind of evidence that a task is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Id mentioned in a branch name or recent commit subject.
    Vcs,
    /// Configured artifact path exists.
    Artifact,
    /// Id marked completed in the progress notes.
    Notes,
}

impl SignalKind {
    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vcs => "vcs",
            Self::Artifact => "artifact",
            Self::Notes => "notes",
        }
    }
}

/// A completion source could not be read.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The notes document exists but could not be read.
    #[error("failed to read notes {path}: {reason}")]
    NotesUnreadable {
        /// Notes document path.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },
}

/// Completed task ids with the evidence for each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompletionSet {
    evidence: BTreeMap<TaskId, BTreeSet<SignalKind>>,
}

impl CompletionSet {
    /// Whether `id` is complete.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.evidence.contains_key(&id)
    }

    /// Signals that marked `id` complete.
    #[must_use]
    pub fn evidence(&self, id: TaskId) -> Option<&BTreeSet<SignalKind>> {
        self.evidence.get(&id)
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.evidence.len()
    }

    /// Whether nothing is complete.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.evidence.is_empty()
    }

    /// Completed ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.evidence.keys().copied()
    }

    /// Records `kind` as evidence for `id`.
    pub fn insert(&mut self, id: TaskId, kind: SignalKind) {
        self.evidence.entry(id).or_default().insert(kind);
    }
}

/// One kind of completion evidence.
pub trait CompletionSource {
    /// Which signal this source produces.
    fn kind(&self) -> SignalKind;

    /// Ids among `ids` this source considers complete.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the source exists but cannot be read.
    fn completed(&self, ctx: &ServiceContext, ids: &[TaskId]) -> Result<Vec<TaskId>, SourceError>;
}

/// Ids mentioned in branch names or recent commit subjects.
#[derive(Debug, Clone)]
pub struct VcsSource {
    lookback: usize,
}

impl VcsSource {
    /// Scans the last `lookback` commits.
    #[must_use]
    pub fn new(lookback: usize) -> Self {
        Self { lookback }
    }
}

impl CompletionSource for VcsSource {
    fn kind(&self) -> SignalKind {
        SignalKind::Vcs
    }

    fn completed(&self, ctx: &ServiceContext, ids: &[TaskId]) -> Result<Vec<TaskId>, SourceError> {
        let history = match ctx.vcs.recent_history(self.lookback) {
            Ok(history) => history.to_lowercase(),
            Err(e) => {
                tracing::debug!(error = %e, "no version-control evidence");
                return Ok(Vec::new());
            }
        };
        Ok(ids.iter().copied().filter(|id| history.contains(&id.search_key())).collect())
    }
}

/// Ids whose configured artifact path exists.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSource {
    artifacts: BTreeMap<TaskId, PathBuf>,
}

impl ArtifactSource {
    /// Uses the given id to path map.
    #[must_use]
    pub fn new(artifacts: BTreeMap<TaskId, PathBuf>) -> Self {
        Self { artifacts }
    }
}

impl CompletionSource for ArtifactSource {
    fn kind(&self) -> SignalKind {
        SignalKind::Artifact
    }

    fn completed(&self, ctx: &ServiceContext, ids: &[TaskId]) -> Result<Vec<TaskId>, SourceError> {
        Ok(ids
            .iter()
            .copied()
            .filter(|id| self.artifacts.get(id).is_some_and(|path| ctx.fs.exists(path)))
            .collect())
    }
}

/// Decides whether lowercased notes mark a task complete.
pub trait NotesMatcher {
    /// `notes` and `key` are both lowercase.
    fn is_completed(&self, notes: &str, key: &str) -> bool;
}

/// Id and keyword anywhere in the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentWideMatcher;

impl NotesMatcher for DocumentWideMatcher {
    fn is_completed(&self, notes: &str, key: &str) -> bool {
        notes.contains(key) && notes.contains(COMPLETED_KEYWORD)
    }
}

/// Id and keyword on the same line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineScopedMatcher;

impl NotesMatcher for LineScopedMatcher {
    fn is_completed(&self, notes: &str, key: &str) -> bool {
        notes.lines().any(|line| line.contains(key) && line.contains(COMPLETED_KEYWORD))
    }
}

/// Ids marked completed in the progress-notes document.
pub struct NotesSource {
    path: PathBuf,
    matcher: Box<dyn NotesMatcher>,
}

impl NotesSource {
    /// Reads `path` and applies `matcher`.
    #[must_use]
    pub fn new(path: PathBuf, matcher: Box<dyn NotesMatcher>) -> Self {
        Self { path, matcher }
    }
}

impl CompletionSource for NotesSource {
    fn kind(&self) -> SignalKind {
        SignalKind::Notes
    }

    fn completed(&self, ctx: &ServiceContext, ids: &[TaskId]) -> Result<Vec<TaskId>, SourceError> {
        if !ctx.fs.exists(&self.path) {
            tracing::debug!(path = %self.path.display(), "no progress notes");
            return Ok(Vec::new());
        }
        let notes = ctx
            .fs
            .read_to_string(&self.path)
            .map_err(|e| SourceError::NotesUnreadable {
                path: self.path.clone(),
                reason: e.to_string(),
            })?
            .to_lowercase();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| self.matcher.is_completed(&notes, &id.search_key()))
            .collect())
    }
}

/// Runs every completion source and merges the results.
pub struct CompletionOracle {
    sources: Vec<Box<dyn CompletionSource>>,
}

impl CompletionOracle {
    /// Oracle over an explicit list of sources.
    #[must_use]
    pub fn new(sources: Vec<Box<dyn CompletionSource>>) -> Self {
        Self { sources }
    }

    /// The version-control, artifact and notes sources as configured.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        let matcher: Box<dyn NotesMatcher> = match config.completion.notes_matching {
            NotesMatching::Document => Box::new(DocumentWideMatcher),
            NotesMatching::Line => Box::new(LineScopedMatcher),
        };
        Self::new(vec![
            Box::new(VcsSource::new(config.completion.commit_lookback)),
            Box::new(ArtifactSource::new(config.artifacts.clone())),
            Box::new(NotesSource::new(config.completion.notes.clone(), matcher)),
        ])
    }

    /// Completion set over the ids of `tasks`.
    pub fn collect(&self, ctx: &ServiceContext, tasks: &[TaskRecord]) -> CompletionSet {
        let ids: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();
        let mut set = CompletionSet::default();
        for source in &self.sources {
            let kind = source.kind();
            match source.completed(ctx, &ids) {
                Ok(found) => {
                    tracing::debug!(
                        source = kind.label(),
                        count = found.len(),
                        "completion evidence"
                    );
                    for id in found {
                        set.insert(id, kind);
                    }
                }
                Err(e) => {
                    tracing::warn!(source = kind.label(), error = %e, "completion source skipped");
                }
            }
        }
        set
    }
}
