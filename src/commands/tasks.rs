//! `planboard tasks` command.

use std::collections::HashSet;
use std::fmt::Write;

use crate::board::record::{PhaseKey, TaskId, TaskRecord};
use crate::board::Board;

/// Execute the `tasks` command.
///
/// # Errors
///
/// Never fails once the board is loaded.
pub fn run(board: &Board, phase: Option<&str>) -> Result<(), String> {
    print!("{}", render(board, phase.map(PhaseKey::parse).as_ref()));
    Ok(())
}

fn status(board: &Board, ready: &HashSet<TaskId>, task: &TaskRecord) -> String {
    if let Some(evidence) = board.done.evidence(task.id) {
        let kinds: Vec<&str> = evidence.iter().map(|k| k.label()).collect();
        format!("done ({})", kinds.join(","))
    } else if ready.contains(&task.id) {
        "ready".to_string()
    } else {
        "blocked".to_string()
    }
}

pub(crate) fn render(board: &Board, phase: Option<&PhaseKey>) -> String {
    let ready: HashSet<TaskId> = board.ready().iter().map(|t| t.id).collect();
    let tasks: Vec<&TaskRecord> =
        board.records.iter().filter(|t| phase.is_none() || phase == Some(&t.phase)).collect();

    let mut out = String::new();
    if tasks.is_empty() {
        match phase {
            Some(p) => {
                let _ = writeln!(out, "No tasks in phase {p}");
            }
            None => {
                let _ = writeln!(out, "No tasks found in {}", board.source.path.display());
            }
        }
        return out;
    }

    let _ = writeln!(
        out,
        "{:<9} {:<16} {:<3} {:<6} {:<7} {:<14} TITLE",
        "ID", "STATUS", "PRI", "PHASE", "SIZE", "TYPE"
    );
    for task in tasks {
        let _ = writeln!(
            out,
            "{:<9} {:<16} {:<3} {:<6} {:<7} {:<14} {}",
            task.id.to_string(),
            status(board, &ready, task),
            task.priority.to_string(),
            task.phase.to_string(),
            task.size.label(),
            task.task_type.label(),
            task.title
        );
    }
    out
}
