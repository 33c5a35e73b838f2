//! `planboard deps` command.

use std::fmt::Write;

use crate::board::graph::EdgeSource;
use crate::board::Board;

/// Execute the `deps` command.
///
/// # Errors
///
/// Never fails once the board is loaded.
pub fn run(board: &Board) -> Result<(), String> {
    print!("{}", render(board));
    Ok(())
}

pub(crate) fn render(board: &Board) -> String {
    let mut out = String::new();
    for task in &board.records {
        let Some(prerequisites) = board.deps.get(task.id) else { continue };
        let ids: Vec<String> = prerequisites.ids.iter().map(ToString::to_string).collect();
        let shown = if ids.is_empty() { "(none)".to_string() } else { ids.join(", ") };
        let origin = match prerequisites.source {
            EdgeSource::Explicit => "explicit",
            EdgeSource::Implicit => "phase order",
        };
        let _ = writeln!(out, "{} <- {shown} [{origin}]", task.id);
    }

    let cycles = board.deps.cycles();
    if !cycles.is_empty() {
        let _ = writeln!(out, "\nCYCLES:");
        for cycle in cycles {
            let chain: Vec<String> = cycle.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "- {} -> {}", chain.join(" -> "), chain[0]);
        }
    }
    out
}
