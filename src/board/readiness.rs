//! Which tasks can be started now.

use super::completion::CompletionSet;
use super::graph::DependencyMap;
use super::record::TaskRecord;

/// Incomplete tasks whose prerequisites are all complete, sorted by phase,
/// then priority, then id.
#[must_use]
pub fn ready_tasks<'t>(
    tasks: &'t [TaskRecord],
    deps: &DependencyMap,
    done: &CompletionSet,
) -> Vec<&'t TaskRecord> {
    let mut ready: Vec<&TaskRecord> = tasks
        .iter()
        .filter(|t| !done.contains(t.id))
        .filter(|t| deps.prerequisites(t.id).iter().all(|dep| done.contains(*dep)))
        .collect();
    ready.sort_by(|a, b| {
        a.phase
            .cmp(&b.phase)
            .then(a.priority.rank().cmp(&b.priority.rank()))
            .then(a.id.cmp(&b.id))
    });
    ready
}

/// First ready task, if any.
#[must_use]
pub fn next_task<'t>(
    tasks: &'t [TaskRecord],
    deps: &DependencyMap,
    done: &CompletionSet,
) -> Option<&'t TaskRecord> {
    ready_tasks(tasks, deps, done).into_iter().next()
}
