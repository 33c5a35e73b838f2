//! Loading a board: locate the plan, extract, graph and resolve.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::completion::{CompletionOracle, CompletionSet};
use super::extract::{extract, ExtractWarning};
use super::graph::DependencyMap;
use super::readiness::{next_task, ready_tasks};
use super::record::{Dialect, PhaseKey, TaskId, TaskRecord};
use crate::config::BoardConfig;
use crate::context::ServiceContext;
use crate::error::BoardError;

/// Where the planning document came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSource {
    /// Document path as given or configured.
    pub path: PathBuf,
    /// Dialect it was parsed with.
    pub dialect: Dialect,
}

/// Everything derived from one planning document in one run.
#[derive(Debug, Clone)]
pub struct Board {
    /// The parsed document.
    pub source: PlanSource,
    /// Records in document order.
    pub records: Vec<TaskRecord>,
    /// Extraction warnings.
    pub warnings: Vec<ExtractWarning>,
    /// Phase heading titles.
    pub phase_titles: BTreeMap<PhaseKey, String>,
    /// Prerequisite edges.
    pub deps: DependencyMap,
    /// Completed tasks and their evidence.
    pub done: CompletionSet,
}

/// Totals across the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of records.
    pub total: usize,
    /// Records in the completion set.
    pub completed: usize,
    /// Records not yet complete.
    pub pending: usize,
}

impl Summary {
    /// Completed share in whole percent; 0 for an empty board.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.completed * 100 / self.total
        }
    }
}

/// Completion counts for one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseProgress {
    /// Phase key.
    pub key: PhaseKey,
    /// Heading title, possibly empty.
    pub title: String,
    /// Records in the phase.
    pub total: usize,
    /// Completed records in the phase.
    pub completed: usize,
}

/// Serializable view of a board for rendering collaborators.
#[derive(Debug, Serialize)]
pub struct BoardSnapshot<'b> {
    /// The parsed document.
    pub plan: &'b PlanSource,
    /// Totals.
    pub summary: Summary,
    /// Per-phase progress in phase order.
    pub phases: Vec<PhaseProgress>,
    /// Records in document order.
    pub records: &'b [TaskRecord],
    /// Prerequisites per task.
    pub dependencies: &'b DependencyMap,
    /// Completed ids with evidence.
    pub completed: &'b CompletionSet,
    /// Startable ids in readiness order.
    pub ready: Vec<TaskId>,
    /// First ready id, or null.
    pub next: Option<TaskId>,
    /// Explicit dependency cycles.
    pub cycles: Vec<Vec<TaskId>>,
    /// Extraction warnings.
    pub warnings: &'b [ExtractWarning],
}

impl Board {
    /// Locates, reads and resolves the planning document.
    ///
    /// `plan` overrides the configured candidates; `dialect` overrides the
    /// candidate's dialect. An explicit plan without a dialect is detected
    /// from its content unless it matches a configured candidate.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PlanNotFound`] if no document exists and
    /// [`BoardError::PlanUnreadable`] if it cannot be read.
    pub fn load(
        ctx: &ServiceContext,
        config: &BoardConfig,
        plan: Option<&Path>,
        dialect: Option<Dialect>,
    ) -> Result<Self, BoardError> {
        let (path, configured) = locate(ctx, config, plan)?;
        let text = ctx.fs.read_to_string(&path).map_err(|e| BoardError::PlanUnreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let dialect = dialect.or(configured).unwrap_or_else(|| Dialect::detect(&text));
        tracing::debug!(path = %path.display(), ?dialect, "loading plan");

        let extraction = extract(&text, dialect);
        let deps = DependencyMap::build(&extraction.records);
        for cycle in deps.cycles() {
            let chain: Vec<String> = cycle.iter().map(ToString::to_string).collect();
            tracing::warn!(cycle = %chain.join(" -> "), "dependency cycle");
        }
        let done = CompletionOracle::from_config(config).collect(ctx, &extraction.records);

        Ok(Self {
            source: PlanSource { path, dialect },
            records: extraction.records,
            warnings: extraction.warnings,
            phase_titles: extraction.phase_titles,
            deps,
            done,
        })
    }

    /// Ready tasks in readiness order.
    #[must_use]
    pub fn ready(&self) -> Vec<&TaskRecord> {
        ready_tasks(&self.records, &self.deps, &self.done)
    }

    /// The task to start next.
    #[must_use]
    pub fn next(&self) -> Option<&TaskRecord> {
        next_task(&self.records, &self.deps, &self.done)
    }

    /// Whole-board totals.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let total = self.records.len();
        let completed = self.records.iter().filter(|r| self.done.contains(r.id)).count();
        Summary { total, completed, pending: total - completed }
    }

    /// Progress of every phase that has records, in phase order.
    #[must_use]
    pub fn phases(&self) -> Vec<PhaseProgress> {
        let mut phases: BTreeMap<&PhaseKey, (usize, usize)> = BTreeMap::new();
        for record in &self.records {
            let counts = phases.entry(&record.phase).or_default();
            counts.0 += 1;
            if self.done.contains(record.id) {
                counts.1 += 1;
            }
        }
        phases
            .into_iter()
            .map(|(key, (total, completed))| PhaseProgress {
                key: key.clone(),
                title: self.phase_titles.get(key).cloned().unwrap_or_default(),
                total,
                completed,
            })
            .collect()
    }

    /// Serializable view of the whole board.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot<'_> {
        let ready: Vec<TaskId> = self.ready().iter().map(|t| t.id).collect();
        BoardSnapshot {
            plan: &self.source,
            summary: self.summary(),
            phases: self.phases(),
            records: &self.records,
            dependencies: &self.deps,
            completed: &self.done,
            next: ready.first().copied(),
            ready,
            cycles: self.deps.cycles(),
            warnings: &self.warnings,
        }
    }
}

fn locate(
    ctx: &ServiceContext,
    config: &BoardConfig,
    plan: Option<&Path>,
) -> Result<(PathBuf, Option<Dialect>), BoardError> {
    if let Some(path) = plan {
        if !ctx.fs.exists(path) {
            return Err(BoardError::PlanNotFound { searched: vec![path.to_path_buf()] });
        }
        let configured =
            config.plan.candidates.iter().find(|c| c.path == path).map(|c| c.dialect);
        return Ok((path.to_path_buf(), configured));
    }

    config
        .plan
        .candidates
        .iter()
        .find(|c| ctx.fs.exists(&c.path))
        .map(|c| (c.path.clone(), Some(c.dialect)))
        .ok_or_else(|| BoardError::PlanNotFound {
            searched: config.plan.candidates.iter().map(|c| c.path.clone()).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{context, MemoryFileSystem};

    const CHECKBOX_PLAN: &str = "\
# Test Implementation Plan

### Phase 0: Critical Fixes (1 day)
- [ ] Fix constructor argument order

### Phase 1: Core Tests
- [ ] Add EquatableArray tests
- [ ] Add model record equality tests
";

    #[test]
    fn phase_one_waits_for_phase_zero() {
        let fs = MemoryFileSystem::default()
            .with("TEST_IMPLEMENTATION_PLAN.md", CHECKBOX_PLAN)
            .with("SESSION_NOTES.md", "TASK-001 completed");
        let board = Board::load(&context(fs, None), &BoardConfig::default(), None, None).unwrap();

        assert_eq!(board.source.dialect, Dialect::Checkbox);
        let ready: Vec<String> = board.ready().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ready, vec!["TASK-002", "TASK-003"]);
        assert_eq!(board.summary(), Summary { total: 3, completed: 1, pending: 2 });
        assert_eq!(board.summary().percent(), 33);
    }

    #[test]
    fn unfinished_task_in_phase_zero_keeps_phase_one_blocked() {
        let plan = "\
### Phase 0: Critical Fixes (1 day)
- [ ] Fix constructor argument order
- [ ] Fix generator caching
### Phase 1: Core Tests
- [ ] Add EquatableArray tests
";
        let fs = MemoryFileSystem::default()
            .with("TEST_IMPLEMENTATION_PLAN.md", plan)
            .with("SESSION_NOTES.md", "TASK-001 completed");
        let board = Board::load(&context(fs, None), &BoardConfig::default(), None, None).unwrap();
        let ready: Vec<String> = board.ready().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ready, vec!["TASK-002"]);

        let fs = MemoryFileSystem::default()
            .with("TEST_IMPLEMENTATION_PLAN.md", plan)
            .with("SESSION_NOTES.md", "TASK-001 completed\nTASK-002 completed");
        let board = Board::load(&context(fs, None), &BoardConfig::default(), None, None).unwrap();
        assert_eq!(board.next().map(|t| t.id), Some(TaskId::new(3)));
    }

    #[test]
    fn completed_commit_moves_next_task_forward() {
        let fs = MemoryFileSystem::default()
            .with("TEST_IMPLEMENTATION_PLAN.md", CHECKBOX_PLAN)
            .with("SESSION_NOTES.md", "TASK-001 completed");
        let ctx = context(fs, Some("main\nabc1234 TASK-002: EquatableArray tests"));
        let board = Board::load(&ctx, &BoardConfig::default(), None, None).unwrap();
        assert_eq!(board.next().map(|t| t.id), Some(TaskId::new(3)));
    }

    #[test]
    fn first_existing_candidate_wins() {
        let fs = MemoryFileSystem::default()
            .with("TEST-COVERAGE-PLAN.md", "- [ ] coverage task\n")
            .with("DEVELOPMENT-PLAN.md", "## Phase 0: A\n### TASK-010: Headed task\n");
        let board = Board::load(&context(fs, None), &BoardConfig::default(), None, None).unwrap();
        assert_eq!(board.source.path, PathBuf::from("DEVELOPMENT-PLAN.md"));
        assert_eq!(board.source.dialect, Dialect::Heading);
        assert_eq!(board.records[0].id, TaskId::new(10));
    }

    #[test]
    fn missing_plan_lists_searched_paths() {
        let err = Board::load(
            &context(MemoryFileSystem::default(), None),
            &BoardConfig::default(),
            None,
            None,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("No planning document found"));
        assert!(message.contains("DEVELOPMENT-PLAN.md"));
        assert!(message.contains("TEST-COVERAGE-PLAN.md"));
    }

    #[test]
    fn explicit_plan_detects_dialect() {
        let fs = MemoryFileSystem::default()
            .with("docs/roadmap.md", "## Phase 1: Core\n### TASK-003: Parser\n");
        let ctx = context(fs, None);
        let board =
            Board::load(&ctx, &BoardConfig::default(), Some(Path::new("docs/roadmap.md")), None)
                .unwrap();
        assert_eq!(board.source.dialect, Dialect::Heading);

        let forced = Board::load(
            &ctx,
            &BoardConfig::default(),
            Some(Path::new("docs/roadmap.md")),
            Some(Dialect::Checkbox),
        )
        .unwrap();
        assert!(forced.records.is_empty());
    }

    #[test]
    fn snapshot_serializes_board() {
        let fs = MemoryFileSystem::default().with("TEST_IMPLEMENTATION_PLAN.md", CHECKBOX_PLAN);
        let board = Board::load(&context(fs, None), &BoardConfig::default(), None, None).unwrap();
        let json = serde_json::to_value(board.snapshot()).unwrap();

        assert_eq!(json["plan"]["dialect"], "checkbox");
        assert_eq!(json["summary"]["total"], 3);
        assert_eq!(json["records"][1]["id"], "TASK-002");
        assert_eq!(json["records"][1]["phase"], "1");
        assert_eq!(json["dependencies"]["TASK-002"]["ids"][0], "TASK-001");
        assert_eq!(json["dependencies"]["TASK-002"]["source"], "implicit");
        assert_eq!(json["ready"][0], "TASK-001");
        assert_eq!(json["next"], "TASK-001");
        assert_eq!(json["phases"][0]["title"], "Critical Fixes (1 day)");
        assert!(json["completed"].as_object().unwrap().is_empty());
    }
}
