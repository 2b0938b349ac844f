//! Mock services for testing
//!
//! A scripted version control collaborator that records every call.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use octo::infrastructure::vcs::{BranchSummary, CommandOutput, VcsError, VcsOperations};

/// Records calls as `"<operation> <project dir name>"` strings.
#[derive(Clone, Default)]
pub struct RecordingVcs {
    call_history: Arc<Mutex<Vec<String>>>,
    /// Project directory names whose commands fail
    failing: Arc<Mutex<HashSet<String>>>,
    branch: Arc<Mutex<Option<String>>>,
}

impl RecordingVcs {
    pub fn new() -> Self {
        let vcs = Self::default();
        *vcs.branch.lock().unwrap() = Some("master".to_string());
        vcs
    }

    /// Makes every command run in `project` fail with exit code 128.
    pub fn fail_for(&self, project: &str) {
        self.failing.lock().unwrap().insert(project.to_string());
    }

    pub fn set_branch(&self, branch: &str) {
        *self.branch.lock().unwrap() = Some(branch.to_string());
    }

    /// Get call history for verification
    pub fn get_call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    fn record(&self, operation: &str, project: &str) -> Result<CommandOutput, VcsError> {
        self.call_history
            .lock()
            .unwrap()
            .push(format!("{operation} {project}"));
        if self.failing.lock().unwrap().contains(project) {
            return Err(VcsError::command_failed(
                format!("git {operation}"),
                128,
                "fatal: scripted failure",
            ));
        }
        Ok(CommandOutput::success(format!("{operation} done\n")))
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[async_trait]
impl VcsOperations for RecordingVcs {
    async fn is_installed(&self) -> bool {
        true
    }

    async fn branch_summary(&self, repo_path: &Path) -> Result<BranchSummary, VcsError> {
        let branch = self.branch.lock().unwrap().clone();
        Ok(match branch {
            Some(branch) => BranchSummary::new(branch, dir_name(repo_path) == "game"),
            None => BranchSummary::unknown(),
        })
    }

    async fn pull(&self, repo_path: &Path) -> Result<CommandOutput, VcsError> {
        self.record("pull", &dir_name(repo_path))
    }

    async fn push(&self, repo_path: &Path) -> Result<CommandOutput, VcsError> {
        self.record("push", &dir_name(repo_path))
    }

    async fn checkout(&self, repo_path: &Path, branch: &str) -> Result<CommandOutput, VcsError> {
        let result = self.record(&format!("checkout {branch}"), &dir_name(repo_path));
        if result.is_ok() {
            self.set_branch(branch);
        }
        result
    }

    async fn clone_into(
        &self,
        _workspace_root: &Path,
        repository: &str,
        project: &str,
    ) -> Result<CommandOutput, VcsError> {
        self.record(&format!("clone {repository}{project}"), project)
    }

    async fn status(&self, repo_path: &Path) -> Result<CommandOutput, VcsError> {
        self.record("status", &dir_name(repo_path))
    }
}
