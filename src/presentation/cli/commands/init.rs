use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::common::templates::get_workspaces_template;
use crate::presentation::ui::DisplayHelper;

/// Write a starter declaration file
pub struct InitCommand {
    /// Declaration file to create
    pub definition_file: PathBuf,
    /// Force overwrite existing file
    pub force: bool,
}

impl InitCommand {
    pub fn new(definition_file: PathBuf, force: bool) -> Self {
        Self {
            definition_file,
            force,
        }
    }

    /// Execute the init command
    pub async fn execute(&self, display: &DisplayHelper) -> Result<()> {
        let target_file = &self.definition_file;

        if target_file.exists() && !self.force {
            return Err(anyhow::anyhow!(
                "File {} already exists. Use --force to overwrite.",
                target_file.display()
            ));
        }

        if let Some(parent) = target_file.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(target_file, get_workspaces_template())?;
        tracing::info!(path = %target_file.display(), "declaration file written");

        display.success(&format!("Created {}", target_file.display()));
        display.info("Declare your workspaces in it, then run 'octo clone <repository-prefix>'");

        Ok(())
    }
}
