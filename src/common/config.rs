use std::path::{Path, PathBuf};

use crate::common::error::OctoError;
use crate::common::result::{OctoResult, OptionExt};
use crate::domain::declaration::ParseMode;

/// Directory under the user's home holding octo's files.
pub const DEFINITION_DIR: &str = ".octo";

/// Name of the default declaration file inside [`DEFINITION_DIR`].
pub const DEFINITION_FILE: &str = "workspaces";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Declaration file describing workspaces and projects
    pub definition_file: PathBuf,

    /// Only visit the workspace with this alias
    pub workspace_filter: Option<String>,

    /// Print the output of the underlying commands
    pub verbose: bool,

    /// Colourise terminal output
    pub colour: bool,

    /// How grammar violations in the declaration file are handled
    pub parse_mode: ParseMode,
}

impl AppConfig {
    /// Creates a configuration reading the given declaration file.
    pub fn new(definition_file: impl Into<PathBuf>) -> Self {
        Self {
            definition_file: definition_file.into(),
            workspace_filter: None,
            verbose: false,
            colour: true,
            parse_mode: ParseMode::Lenient,
        }
    }

    /// Creates a configuration reading `<home>/.octo/workspaces`.
    pub fn from_home() -> OctoResult<Self> {
        Ok(Self::new(Self::default_definition_file()?))
    }

    /// Location of the declaration file when `--def` is not given.
    pub fn default_definition_file() -> OctoResult<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_octo(OctoError::config_error("Cannot determine the home directory"))?;
        Ok(Self::definition_file_in(&home))
    }

    /// Declaration file location relative to a home directory.
    pub fn definition_file_in(home: &Path) -> PathBuf {
        home.join(DEFINITION_DIR).join(DEFINITION_FILE)
    }

    pub fn with_workspace_filter(mut self, alias: impl Into<String>) -> Self {
        self.workspace_filter = Some(alias.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_colour(mut self, colour: bool) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    /// Rejects empty option values.
    pub fn validate(&self) -> OctoResult<()> {
        if self.definition_file.as_os_str().is_empty() {
            return Err(OctoError::config_error("Invalid definition file option"));
        }
        if matches!(self.workspace_filter.as_deref(), Some("")) {
            return Err(OctoError::config_error("Invalid workspace option"));
        }
        Ok(())
    }
}
