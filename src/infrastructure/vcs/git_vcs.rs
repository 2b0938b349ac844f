use super::vcs_interface::{BranchSummary, CommandOutput, VcsError, VcsOperations};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Git implementation of [`VcsOperations`] driving the `git` executable.
pub struct GitVcs {
    git_executable: String,
}

impl Default for GitVcs {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
        }
    }
}

impl GitVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a specific git binary instead of the one on `PATH`.
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            git_executable: executable.into(),
        }
    }

    fn command_line(&self, args: &[&str]) -> String {
        format!("{} {}", self.git_executable, args.join(" "))
    }

    /// Runs git in `working_dir` and captures its output.
    async fn execute(
        &self,
        args: &[&str],
        working_dir: &Path,
    ) -> Result<CommandOutput, VcsError> {
        debug!(command = %self.command_line(args), dir = %working_dir.display(), "exec");

        let output = Command::new(&self.git_executable)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|error| match error.kind() {
                std::io::ErrorKind::NotFound => VcsError::executable_not_found(&self.git_executable),
                _ => VcsError::from(error),
            })?;

        let result = CommandOutput::new(
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        debug!(exit_code = result.exit_code, "exec finished");
        Ok(result)
    }

    /// Runs git and turns a non-zero exit code into [`VcsError::CommandFailed`].
    async fn execute_checked(
        &self,
        args: &[&str],
        working_dir: &Path,
    ) -> Result<CommandOutput, VcsError> {
        let output = self.execute(args, working_dir).await?;
        if !output.is_success() {
            return Err(VcsError::command_failed(
                self.command_line(args),
                output.exit_code,
                output.stderr.trim(),
            ));
        }
        Ok(output)
    }

    fn ensure_repository_dir(repo_path: &Path) -> Result<(), VcsError> {
        if !repo_path.is_dir() {
            return Err(VcsError::repository_not_found(repo_path.display().to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl VcsOperations for GitVcs {
    async fn is_installed(&self) -> bool {
        let status = Command::new(&self.git_executable)
            .arg("version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        matches!(status, Ok(status) if status.success())
    }

    async fn branch_summary(&self, repo_path: &Path) -> Result<BranchSummary, VcsError> {
        Self::ensure_repository_dir(repo_path)?;

        let branch = self
            .execute_checked(&["rev-parse", "--abbrev-ref", "HEAD"], repo_path)
            .await
            .ok()
            .map(|output| output.stdout.trim().to_string())
            .filter(|branch| !branch.is_empty());

        let has_changes = self
            .execute_checked(&["status", "--porcelain"], repo_path)
            .await
            .map(|output| !output.stdout.trim().is_empty())
            .unwrap_or(false);

        Ok(BranchSummary {
            branch,
            has_changes,
        })
    }

    async fn pull(&self, repo_path: &Path) -> Result<CommandOutput, VcsError> {
        Self::ensure_repository_dir(repo_path)?;
        self.execute_checked(&["pull", "-p"], repo_path).await
    }

    async fn push(&self, repo_path: &Path) -> Result<CommandOutput, VcsError> {
        Self::ensure_repository_dir(repo_path)?;
        self.execute_checked(&["push"], repo_path).await
    }

    async fn checkout(&self, repo_path: &Path, branch: &str) -> Result<CommandOutput, VcsError> {
        Self::ensure_repository_dir(repo_path)?;
        self.execute_checked(&["checkout", branch], repo_path).await
    }

    async fn clone_into(
        &self,
        workspace_root: &Path,
        repository: &str,
        project: &str,
    ) -> Result<CommandOutput, VcsError> {
        tokio::fs::create_dir_all(workspace_root).await?;
        let url = format!("{repository}{project}");
        self.execute_checked(&["clone", &url, project], workspace_root)
            .await
    }

    async fn status(&self, repo_path: &Path) -> Result<CommandOutput, VcsError> {
        Self::ensure_repository_dir(repo_path)?;
        self.execute_checked(&["status"], repo_path).await
    }
}
