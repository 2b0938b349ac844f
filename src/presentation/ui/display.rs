use colored::Colorize;

use crate::application::use_cases::{OutcomeStatus, ProjectOutcome};
use crate::common::error_sink::ErrorSink;
use crate::infrastructure::vcs::BranchSummary;

/// Display utilities for the CLI interface
pub struct DisplayHelper {
    pub use_color: bool,
}

impl DisplayHelper {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "✓".green().bold(), message);
        } else {
            println!("[SUCCESS] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "::".blue().bold(), message);
        } else {
            println!("[INFO] {}", message);
        }
    }

    /// Line introducing the projects of one workspace
    pub fn workspace_header(&self, name: &str, path: &str) -> String {
        if self.use_color {
            format!("Workspace {} (name: {})", path.bold(), name.bold())
        } else {
            format!("Workspace {} (name: {})", path, name)
        }
    }

    /// `{branch}` followed by a change marker when the tree is dirty
    pub fn format_branch(&self, summary: &BranchSummary) -> String {
        let branch = match (&summary.branch, self.use_color) {
            (None, _) => "???".to_string(),
            (Some(branch), false) => branch.clone(),
            (Some(branch), true) if summary.is_mainline() => branch.cyan().to_string(),
            (Some(branch), true) => branch.bright_cyan().to_string(),
        };

        let mut line = format!("{{{branch}}}");
        if summary.has_changes {
            let marker = if self.use_color {
                "Changed!".red().to_string()
            } else {
                "Changed!".to_string()
            };
            line.push(' ');
            line.push_str(&marker);
        }
        line
    }

    /// Progress line for one project: ` · Pulling reader {master} Changed!`
    pub fn format_outcome(&self, verb: &str, outcome: &ProjectOutcome) -> String {
        let project = &outcome.triple.project;
        let mut line = if self.use_color {
            format!(" · {} {}", verb, project.yellow())
        } else {
            format!(" · {} {}", verb, project)
        };

        if let Some(summary) = &outcome.branch {
            line.push(' ');
            line.push_str(&self.format_branch(summary));
        }

        match &outcome.status {
            OutcomeStatus::Skipped { reason } => {
                let note = format!("(skipped: {reason})");
                line.push(' ');
                line.push_str(&self.dim(&note));
            }
            OutcomeStatus::Failed { .. } => {
                line.push(' ');
                line.push_str(&self.failure_mark());
            }
            OutcomeStatus::Succeeded | OutcomeStatus::Listed => {}
        }
        line
    }

    fn dim(&self, text: &str) -> String {
        if self.use_color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn failure_mark(&self) -> String {
        if self.use_color {
            "✗".red().bold().to_string()
        } else {
            "[FAILED]".to_string()
        }
    }
}

/// Error sink printing every published error to stderr.
pub struct ConsoleErrorSink {
    use_color: bool,
    published: usize,
}

impl ConsoleErrorSink {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            published: 0,
        }
    }

    /// Number of errors published so far
    pub fn published(&self) -> usize {
        self.published
    }
}

impl ErrorSink for ConsoleErrorSink {
    fn publish(&mut self, code: i32, message: &str) {
        tracing::debug!(code, message, "error published");
        self.published += 1;
        if self.use_color {
            eprintln!("{} {}", "Error:".red().bold(), message);
        } else {
            eprintln!("Error: {}", message);
        }
    }
}
