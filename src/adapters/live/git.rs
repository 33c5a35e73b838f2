//! Live version-control adapter using the `git` CLI.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::ports::vcs::{VcsHistory, VcsUnavailable};

/// Live adapter that shells out to `git` in the project root.
///
/// Only two fixed, read-only queries are ever issued: `git branch -a` and
/// `git log --oneline -<lookback>`.
pub struct LiveGitHistory {
    root: PathBuf,
}

impl LiveGitHistory {
    /// Creates an adapter that runs `git` inside `root`.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf() }
    }

    fn git(&self, args: &[&str]) -> Result<String, VcsUnavailable> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| VcsUnavailable::new(format!("failed to run git: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VcsUnavailable::new(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VcsHistory for LiveGitHistory {
    fn recent_history(&self, lookback: usize) -> Result<String, VcsUnavailable> {
        let limit = format!("-{lookback}");
        let branches = self.git(&["branch", "-a"]);
        let commits = self.git(&["log", "--oneline", &limit]);

        match (branches, commits) {
            (Err(e), Err(_)) => Err(e),
            (branches, commits) => {
                let mut text = branches.unwrap_or_default();
                text.push_str(&commits.unwrap_or_default());
                Ok(text)
            }
        }
    }
}
