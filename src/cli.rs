//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::board::record::Dialect;

/// Top-level CLI parser for `planboard`.
#[derive(Debug, Parser)]
#[command(
    name = "planboard",
    version,
    about = "Dependency-aware task board for markdown planning documents"
)]
pub struct Cli {
    /// Project root holding the plan, notes and artifacts.
    #[arg(long, global = true, env = "PLANBOARD_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Config file, relative to the root [default: planboard.toml].
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Planning document, instead of the configured candidates.
    #[arg(long, global = true)]
    pub plan: Option<PathBuf>,

    /// Dialect of the planning document.
    #[arg(long, global = true, value_enum)]
    pub dialect: Option<Dialect>,

    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Task board: progress, top ready tasks, per-phase progress.
    Status,
    /// The single task to start next.
    Next,
    /// Every task with its status.
    Tasks {
        /// Only tasks of this phase.
        #[arg(long)]
        phase: Option<String>,
    },
    /// Prerequisites of every task and any dependency cycles.
    Deps,
    /// The full board as structured data.
    Export {
        /// Output format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
}

/// Structured output formats for `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_with_defaults() {
        let cli = Cli::try_parse_from(["planboard", "status"]).unwrap();
        assert!(matches!(cli.command, Command::Status));
        assert!(cli.plan.is_none());
        assert!(cli.dialect.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "planboard",
            "next",
            "--root",
            "/work/project",
            "--plan",
            "ROADMAP.md",
            "--dialect",
            "checkbox",
            "-v",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Next));
        assert_eq!(cli.root, PathBuf::from("/work/project"));
        assert_eq!(cli.plan, Some(PathBuf::from("ROADMAP.md")));
        assert_eq!(cli.dialect, Some(Dialect::Checkbox));
        assert!(cli.verbose);
    }

    #[test]
    fn parses_tasks_phase_filter() {
        let cli = Cli::try_parse_from(["planboard", "tasks", "--phase", "2"]).unwrap();
        assert!(matches!(cli.command, Command::Tasks { phase: Some(ref p) } if p == "2"));
    }

    #[test]
    fn export_defaults_to_json() {
        let cli = Cli::try_parse_from(["planboard", "export"]).unwrap();
        assert!(matches!(cli.command, Command::Export { format: ExportFormat::Json }));
        let cli = Cli::try_parse_from(["planboard", "export", "--format", "yaml"]).unwrap();
        assert!(matches!(cli.command, Command::Export { format: ExportFormat::Yaml }));
    }

    #[test]
    fn rejects_unknown_dialect() {
        assert!(Cli::try_parse_from(["planboard", "status", "--dialect", "csv"]).is_err());
    }
}
