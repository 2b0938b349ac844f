//! Applies one repository action to every declared project.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::common::error::OctoError;
use crate::common::error_sink::{ErrorSink, INVALID_VIRTUAL_PATH};
use crate::common::result::OctoResult;
use crate::domain::entities::{ProjectTriple, Universe};
use crate::domain::value_objects::VirtualPath;
use crate::infrastructure::vcs::{BranchSummary, CommandOutput, VcsError, VcsOperations};

/// What to do with each project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Pull,
    Push,
    Checkout { branch: String },
    Clone { repository: String },
    Status,
    List,
    /// Resolve a single `alias/project` path; not applied per project.
    Path { virtual_path: VirtualPath },
}

impl Action {
    /// Whether the action runs once per project.
    pub fn is_repetitive(&self) -> bool {
        !matches!(self, Self::Path { .. })
    }

    /// Whether the action needs the version control tool.
    pub fn requires_vcs(&self) -> bool {
        !matches!(self, Self::List | Self::Path { .. })
    }

    /// Silent actions print bare paths, without workspace headers or progress lines.
    pub fn is_silent(&self) -> bool {
        self.verb().is_none()
    }

    /// Progress verb shown next to each project.
    pub fn verb(&self) -> Option<&'static str> {
        match self {
            Self::Pull => Some("Pulling"),
            Self::Push => Some("Pushing"),
            Self::Checkout { .. } => Some("Checking out"),
            Self::Clone { .. } => Some("Cloning"),
            Self::Status => Some("Found"),
            Self::List | Self::Path { .. } => None,
        }
    }

    fn failure_message(&self, project: &str) -> String {
        match self {
            Self::Pull => format!("Failed to pull '{project}'"),
            Self::Push => format!("Failed to push '{project}'"),
            Self::Checkout { branch } => format!("Failed to check out '{branch}' in '{project}'"),
            Self::Clone { .. } => format!("Failed to clone '{project}'"),
            Self::Status => format!("Failed to retrieve status of '{project}'"),
            Self::List | Self::Path { .. } => format!("Failed to process '{project}'"),
        }
    }
}

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct RunActionConfig {
    pub action: Action,

    /// Only visit the workspace with this alias
    pub workspace_filter: Option<String>,

    /// Keep the full output of every command
    pub verbose: bool,
}

impl RunActionConfig {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            workspace_filter: None,
            verbose: false,
        }
    }

    pub fn with_workspace_filter(mut self, alias: Option<String>) -> Self {
        self.workspace_filter = alias;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Succeeded,
    Listed,
    Skipped { reason: String },
    Failed { message: String },
}

/// Result of applying the action to one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOutcome {
    pub triple: ProjectTriple,
    pub project_dir: PathBuf,
    pub status: OutcomeStatus,
    pub branch: Option<BranchSummary>,
    /// Command output, kept only in verbose mode
    pub output: Option<String>,
}

impl ProjectOutcome {
    fn new(triple: ProjectTriple, project_dir: PathBuf, status: OutcomeStatus) -> Self {
        Self {
            triple,
            project_dir,
            status,
            branch: None,
            output: None,
        }
    }

    fn with_branch(mut self, branch: Option<BranchSummary>) -> Self {
        self.branch = branch;
        self
    }

    fn with_output(mut self, output: Option<String>) -> Self {
        self.output = output.filter(|text| !text.trim().is_empty());
        self
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }
}

/// Counters for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionReport {
    pub processed: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl ActionReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, outcome: &ProjectOutcome) {
        self.processed += 1;
        match &outcome.status {
            OutcomeStatus::Succeeded | OutcomeStatus::Listed => self.succeeded += 1,
            OutcomeStatus::Skipped { .. } => self.skipped += 1,
            OutcomeStatus::Failed { message } => {
                self.failed += 1;
                self.errors.push(message.clone());
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Runs an [`Action`] across the projects of a [`Universe`].
pub struct RunActionUseCase<V> {
    config: RunActionConfig,
    vcs: V,
}

impl<V: VcsOperations> RunActionUseCase<V> {
    pub fn new(config: RunActionConfig, vcs: V) -> Self {
        Self { config, vcs }
    }

    pub fn config(&self) -> &RunActionConfig {
        &self.config
    }

    /// Applies the action to every selected project in declaration order.
    ///
    /// `on_outcome` sees each result as soon as it is known. Failures are
    /// published to `sink` and do not stop the run.
    pub async fn execute<F>(
        &self,
        universe: &Universe,
        sink: &mut dyn ErrorSink,
        mut on_outcome: F,
    ) -> OctoResult<ActionReport>
    where
        F: FnMut(&ProjectOutcome),
    {
        if let Some(alias) = &self.config.workspace_filter {
            if universe.workspace(alias).is_none() {
                return Err(OctoError::unknown_workspace(alias));
            }
        }

        let selected: Vec<ProjectTriple> = universe
            .triples()
            .into_iter()
            .filter(|triple| self.selects(&triple.workspace_name))
            .collect();
        info!(action = ?self.config.action, projects = selected.len(), "running action");

        let mut report = ActionReport::new();
        for triple in selected {
            let Some(workspace) = universe.workspace(&triple.workspace_name) else {
                continue;
            };
            let root = workspace.root_dir();
            let outcome = self.apply(triple, root, sink).await;
            report.record(&outcome);
            on_outcome(&outcome);
        }

        debug!(?report, "action finished");
        Ok(report)
    }

    /// Resolves the path addressed by a non-repetitive [`Action::Path`].
    ///
    /// An unknown alias is published to `sink` and returned as an error.
    pub fn resolve_path(
        &self,
        universe: &Universe,
        virtual_path: &VirtualPath,
        sink: &mut dyn ErrorSink,
    ) -> OctoResult<PathBuf> {
        match universe.resolve_virtual_path(virtual_path) {
            Some(path) => Ok(path),
            None => {
                let error = OctoError::invalid_virtual_path(virtual_path.to_string());
                sink.publish(INVALID_VIRTUAL_PATH, &error.to_string());
                Err(error)
            }
        }
    }

    fn selects(&self, workspace_name: &str) -> bool {
        self.config
            .workspace_filter
            .as_deref()
            .map_or(true, |alias| alias == workspace_name)
    }

    async fn apply(
        &self,
        triple: ProjectTriple,
        workspace_root: PathBuf,
        sink: &mut dyn ErrorSink,
    ) -> ProjectOutcome {
        let project_dir = workspace_root.join(&triple.project);
        let action = &self.config.action;

        match action {
            Action::List | Action::Path { .. } => {
                return ProjectOutcome::new(triple, project_dir, OutcomeStatus::Listed);
            }
            Action::Clone { repository } => {
                let result = self
                    .vcs
                    .clone_into(&workspace_root, repository, &triple.project)
                    .await;
                return self.finish(triple, project_dir, None, result, sink);
            }
            _ => {}
        }

        if !project_dir.is_dir() {
            debug!(dir = %project_dir.display(), "project directory missing");
            let reason = format!("{} does not exist", project_dir.display());
            return ProjectOutcome::new(triple, project_dir, OutcomeStatus::Skipped { reason });
        }

        match action {
            Action::Pull => {
                let branch = self.vcs.branch_summary(&project_dir).await.ok();
                let result = self.vcs.pull(&project_dir).await;
                self.finish(triple, project_dir, branch, result, sink)
            }
            Action::Push => {
                let branch = self.vcs.branch_summary(&project_dir).await.ok();
                let result = self.vcs.push(&project_dir).await;
                self.finish(triple, project_dir, branch, result, sink)
            }
            Action::Checkout { branch } => {
                let result = self.vcs.checkout(&project_dir, branch).await;
                let summary = self.vcs.branch_summary(&project_dir).await.ok();
                self.finish(triple, project_dir, summary, result, sink)
            }
            Action::Status => match self.vcs.branch_summary(&project_dir).await {
                Ok(summary) => {
                    let result = if self.config.verbose {
                        self.vcs.status(&project_dir).await
                    } else {
                        Ok(CommandOutput::default())
                    };
                    self.finish(triple, project_dir, Some(summary), result, sink)
                }
                Err(error) => self.finish(triple, project_dir, None, Err(error), sink),
            },
            Action::List | Action::Path { .. } | Action::Clone { .. } => {
                ProjectOutcome::new(triple, project_dir, OutcomeStatus::Listed)
            }
        }
    }

    fn finish(
        &self,
        triple: ProjectTriple,
        project_dir: PathBuf,
        branch: Option<BranchSummary>,
        result: Result<CommandOutput, VcsError>,
        sink: &mut dyn ErrorSink,
    ) -> ProjectOutcome {
        match result {
            Ok(output) => {
                let output = self.config.verbose.then(|| output.combined());
                ProjectOutcome::new(triple, project_dir, OutcomeStatus::Succeeded)
                    .with_branch(branch)
                    .with_output(output)
            }
            Err(error) => {
                let message = self.config.action.failure_message(&triple.project);
                debug!(%error, "{message}");
                sink.publish(error.exit_code(), &message);
                let output = match &error {
                    VcsError::CommandFailed { stderr, .. } if self.config.verbose => {
                        Some(stderr.clone())
                    }
                    _ => None,
                };
                ProjectOutcome::new(triple, project_dir, OutcomeStatus::Failed { message })
                    .with_branch(branch)
                    .with_output(output)
            }
        }
    }
}
