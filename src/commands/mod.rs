//! Command dispatch and handlers.

pub mod deps;
pub mod export;
pub mod next;
pub mod status;
pub mod tasks;

use std::env;
use std::path::{Path, PathBuf};

use crate::board::Board;
use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::{BoardConfig, CONFIG_FILE};
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `PLANBOARD_REPLAY` names a cassette file, ports are served from it.
/// Otherwise, when `PLANBOARD_RECORD` names a directory, every port
/// interaction is recorded to a new cassette in that directory.
///
/// # Errors
///
/// Returns an error string if the board cannot be loaded or the command fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    if let Ok(path) = env::var("PLANBOARD_REPLAY") {
        let ctx = ServiceContext::replaying(Path::new(&path))?;
        return dispatch_with_context(cli, &ctx);
    }

    if let Ok(dir) = env::var("PLANBOARD_RECORD") {
        let session = RecordingSession::new(Path::new(&dir), &cli.root)?;
        let ctx = ServiceContext::recording(&cli.root, &session);
        let result = dispatch_with_context(cli, &ctx);
        // Adapters hold recorder handles until the context is gone.
        drop(ctx);
        finish_recording(session)?;
        return result;
    }

    dispatch_with_context(cli, &ServiceContext::live(&cli.root))
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(cli: &Cli, ctx: &ServiceContext) -> Result<(), String> {
    let config = load_config(cli, ctx)?;
    let board = Board::load(ctx, &config, cli.plan.as_deref(), cli.dialect)
        .map_err(|e| e.to_string())?;

    match &cli.command {
        Command::Status => status::run(&board),
        Command::Next => next::run(&board),
        Command::Tasks { phase } => tasks::run(&board, phase.as_deref()),
        Command::Deps => deps::run(&board),
        Command::Export { format } => export::run(&board, *format),
    }
}

/// Reads the config through the context's filesystem so cassettes carry it.
fn load_config(cli: &Cli, ctx: &ServiceContext) -> Result<BoardConfig, String> {
    let (path, required) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(CONFIG_FILE), false),
    };
    BoardConfig::load(ctx.fs.as_ref(), &path, required).map_err(|e| e.to_string())
}

/// Finish a recording session and print the cassette path.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let path: PathBuf = session.finish()?;
    eprintln!("Recording saved to: {}", path.display());
    Ok(())
}

/// `[████░░░░]` bar of `width` cells for `done` out of `total`.
pub(crate) fn progress_bar(done: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 { 0 } else { done * width / total };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
