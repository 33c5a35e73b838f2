//! `planboard next` command.

use crate::board::Board;

/// Execute the `next` command.
///
/// # Errors
///
/// Never fails once the board is loaded.
pub fn run(board: &Board) -> Result<(), String> {
    println!("{}", render(board));
    Ok(())
}

pub(crate) fn render(board: &Board) -> String {
    match board.next() {
        Some(task) => format!(
            "Next task: {} - {}\nPriority: {} | Phase: {} | Estimate: {}",
            task.id, task.title, task.priority, task.phase, task.estimate
        ),
        None => "No tasks available".to_string(),
    }
}
