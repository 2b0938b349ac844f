use async_trait::async_trait;
use std::path::Path;

use crate::common::error_sink::ACTION_FAILED;

/// Version control operations applied to one project directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VcsOperations: Send + Sync {
    /// Whether the version control executable can be run at all
    async fn is_installed(&self) -> bool;

    /// Current branch and whether the working tree has uncommitted changes
    async fn branch_summary(&self, repo_path: &Path) -> Result<BranchSummary, VcsError>;

    /// Pull from the tracked remote, pruning deleted remote branches
    async fn pull(&self, repo_path: &Path) -> Result<CommandOutput, VcsError>;

    /// Push the current branch to its remote
    async fn push(&self, repo_path: &Path) -> Result<CommandOutput, VcsError>;

    /// Switch the working tree to `branch`
    async fn checkout(&self, repo_path: &Path, branch: &str) -> Result<CommandOutput, VcsError>;

    /// Clone `<repository><project>` into `workspace_root/<project>`
    async fn clone_into(
        &self,
        workspace_root: &Path,
        repository: &str,
        project: &str,
    ) -> Result<CommandOutput, VcsError>;

    /// Human readable working tree status
    async fn status(&self, repo_path: &Path) -> Result<CommandOutput, VcsError>;
}

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self::new(0, stdout, "")
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout followed by stderr, the way a terminal would show them.
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}{}", self.stdout, self.stderr),
        }
    }
}

/// Branch information shown next to every project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchSummary {
    /// `None` when the branch could not be determined
    pub branch: Option<String>,
    pub has_changes: bool,
}

impl BranchSummary {
    pub fn new(branch: impl Into<String>, has_changes: bool) -> Self {
        Self {
            branch: Some(branch.into()),
            has_changes,
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    /// Whether the branch is one of the usual integration branches.
    pub fn is_mainline(&self) -> bool {
        matches!(self.branch.as_deref(), Some("master" | "main"))
    }
}

/// Errors raised by version control operations
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    #[error("Repository not found at path: {path}")]
    RepositoryNotFound { path: String },

    #[error("VCS executable not found: {executable}")]
    ExecutableNotFound { executable: String },

    #[error("Command execution failed: {command}, exit code: {exit_code}, stderr: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl VcsError {
    pub fn repository_not_found(path: impl Into<String>) -> Self {
        Self::RepositoryNotFound { path: path.into() }
    }

    pub fn executable_not_found(executable: impl Into<String>) -> Self {
        Self::ExecutableNotFound {
            executable: executable.into(),
        }
    }

    pub fn command_failed(
        command: impl Into<String>,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Exit code to report for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { exit_code, .. } => *exit_code,
            _ => ACTION_FAILED,
        }
    }
}
