//! `planboard status` command.

use std::fmt::Write;

use crate::board::Board;

use super::progress_bar;

/// Ready tasks listed on the board.
const TOP_READY: usize = 5;

/// Execute the `status` command.
///
/// # Errors
///
/// Never fails once the board is loaded.
pub fn run(board: &Board) -> Result<(), String> {
    print!("{}", render(board));
    Ok(())
}

/// Renders the task board.
pub(crate) fn render(board: &Board) -> String {
    let mut out = String::new();
    let rule = "-".repeat(80);
    let summary = board.summary();

    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "TASK STATUS: {}", board.source.path.display());
    let _ = writeln!(out, "{}\n", "=".repeat(80));
    let _ = writeln!(
        out,
        "Total Tasks: {} | Completed: {} | Pending: {}",
        summary.total, summary.completed, summary.pending
    );
    let _ = writeln!(
        out,
        "Progress: [{}] {}%\n",
        progress_bar(summary.completed, summary.total, 20),
        summary.percent()
    );

    let _ = writeln!(out, "NEXT AVAILABLE TASKS:\n{rule}");
    let ready = board.ready();
    if ready.is_empty() {
        let _ = writeln!(out, "No tasks available. Check if initial tasks are completed.");
    }
    for (i, task) in ready.iter().take(TOP_READY).enumerate() {
        let deps = board.deps.prerequisites(task.id);
        let dep_note = if deps.is_empty() {
            String::new()
        } else {
            let ids: Vec<String> = deps.iter().map(ToString::to_string).collect();
            format!(" (depends on: {})", ids.join(", "))
        };
        let _ = writeln!(out, "{}. [{}] {}: {}", i + 1, task.priority, task.id, task.title);
        let _ = writeln!(
            out,
            "   Phase: {} | Estimate: {}{dep_note}\n",
            task.phase, task.estimate
        );
    }
    if ready.len() > TOP_READY {
        let _ = writeln!(out, "... and {} more ready\n", ready.len() - TOP_READY);
    }

    let _ = writeln!(out, "\nPHASE PROGRESS:\n{rule}");
    for phase in board.phases() {
        let name = if phase.title.is_empty() {
            format!("Phase {}", phase.key)
        } else {
            phase.title.clone()
        };
        let percent = phase.completed * 100 / phase.total;
        let _ = writeln!(
            out,
            "{name:20} [{}/{}] {} {percent}%",
            phase.completed,
            phase.total,
            progress_bar(phase.completed, phase.total, 10)
        );
    }

    if !board.warnings.is_empty() {
        let _ = writeln!(out, "\nWARNINGS:\n{rule}");
        for warning in &board.warnings {
            let _ = writeln!(out, "{warning}");
        }
    }
    out
}
