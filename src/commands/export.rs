//! `planboard export` command.

use crate::board::Board;
use crate::cli::ExportFormat;

/// Execute the `export` command.
///
/// # Errors
///
/// Returns an error string if the snapshot cannot be serialized.
pub fn run(board: &Board, format: ExportFormat) -> Result<(), String> {
    let text = render(board, format)?;
    print!("{text}");
    Ok(())
}

pub(crate) fn render(board: &Board, format: ExportFormat) -> Result<String, String> {
    let snapshot = board.snapshot();
    match format {
        ExportFormat::Json => serde_json::to_string_pretty(&snapshot)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| format!("Failed to serialize board as JSON: {e}")),
        ExportFormat::Yaml => serde_yaml::to_string(&snapshot)
            .map_err(|e| format!("Failed to serialize board as YAML: {e}")),
    }
}
