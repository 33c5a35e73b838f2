//! Prerequisite edges between task records.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use super::record::{TaskId, TaskRecord};

/// How a task's prerequisites were decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSource {
    /// Resolved from the task's own dependency text.
    Explicit,
    /// Every task of a strictly earlier phase.
    Implicit,
}

/// Prerequisites of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prerequisites {
    /// Ids that must be complete first, in resolution order.
    pub ids: Vec<TaskId>,
    /// Where the edges came from.
    pub source: EdgeSource,
}

/// Task id to ordered prerequisites, for every parsed record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyMap {
    edges: BTreeMap<TaskId, Prerequisites>,
}

impl DependencyMap {
    /// Builds the map from records in document order.
    ///
    /// References to unknown ids and to the task itself are dropped. A task
    /// whose dependency text resolves to nothing depends on every task of a
    /// strictly lower phase.
    #[must_use]
    pub fn build(tasks: &[TaskRecord]) -> Self {
        let known: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
        let mut edges = BTreeMap::new();

        for task in tasks {
            let mut explicit = Vec::new();
            for reference in TaskId::find_all(&task.dependencies) {
                if reference == task.id {
                    tracing::debug!(task = %task.id, "dropping self dependency");
                } else if !known.contains(&reference) {
                    tracing::debug!(task = %task.id, %reference, "dropping unknown dependency");
                } else if !explicit.contains(&reference) {
                    explicit.push(reference);
                }
            }

            let prerequisites = if explicit.is_empty() {
                let ids = tasks.iter().filter(|t| t.phase < task.phase).map(|t| t.id).collect();
                Prerequisites { ids, source: EdgeSource::Implicit }
            } else {
                Prerequisites { ids: explicit, source: EdgeSource::Explicit }
            };
            edges.insert(task.id, prerequisites);
        }

        Self { edges }
    }

    /// Prerequisites of `id`; empty for unknown ids.
    #[must_use]
    pub fn prerequisites(&self, id: TaskId) -> &[TaskId] {
        self.edges.get(&id).map(|p| p.ids.as_slice()).unwrap_or_default()
    }

    /// Full entry for `id`.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Prerequisites> {
        self.edges.get(&id)
    }

    /// Entries ordered by task id.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &Prerequisites)> {
        self.edges.iter().map(|(id, p)| (*id, p))
    }

    /// Number of tasks in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the map has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Dependency cycles, each listed from its first visited member.
    ///
    /// Only explicit edges can close a cycle; the implicit rule always points
    /// to strictly lower phases.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<TaskId>> {
        let mut cycles = Vec::new();
        let mut visited = BTreeSet::new();
        let mut on_stack = HashSet::new();
        let mut stack = Vec::new();

        for id in self.edges.keys() {
            if !visited.contains(id) {
                self.find_cycles(*id, &mut visited, &mut on_stack, &mut stack, &mut cycles);
            }
        }
        cycles
    }

    fn find_cycles(
        &self,
        node: TaskId,
        visited: &mut BTreeSet<TaskId>,
        on_stack: &mut HashSet<TaskId>,
        stack: &mut Vec<TaskId>,
        cycles: &mut Vec<Vec<TaskId>>,
    ) {
        visited.insert(node);
        on_stack.insert(node);
        stack.push(node);

        for &dep in self.prerequisites(node) {
            if !visited.contains(&dep) {
                self.find_cycles(dep, visited, on_stack, stack, cycles);
            } else if on_stack.contains(&dep) {
                if let Some(start) = stack.iter().position(|&n| n == dep) {
                    cycles.push(stack[start..].to_vec());
                }
            }
        }

        stack.pop();
        on_stack.remove(&node);
    }
}
