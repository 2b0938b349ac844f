use std::path::PathBuf;
use thiserror::Error;

use crate::infrastructure::vcs::VcsError;

#[derive(Error, Debug)]
pub enum OctoError {
    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Declaration error on line {line}: {message}")]
    DeclarationError {
        message: String,
        line: usize,
        file_path: Option<PathBuf>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Command execution failed: {message}")]
    CommandError {
        message: String,
        command: String,
        exit_code: Option<i32>,
        #[source]
        source: Option<VcsError>,
    },

    #[error("Invalid virtual path '{path}'")]
    InvalidVirtualPath { path: String },

    #[error("Unknown workspace '{alias}'")]
    UnknownWorkspace { alias: String },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl OctoError {
    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn declaration_error(
        message: impl Into<String>,
        line: usize,
        file_path: Option<PathBuf>,
    ) -> Self {
        Self::DeclarationError {
            message: message.into(),
            line,
            file_path,
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    pub fn command_error_with_source(
        message: impl Into<String>,
        command: impl Into<String>,
        exit_code: Option<i32>,
        source: VcsError,
    ) -> Self {
        Self::CommandError {
            message: message.into(),
            command: command.into(),
            exit_code,
            source: Some(source),
        }
    }

    pub fn invalid_virtual_path(path: impl Into<String>) -> Self {
        Self::InvalidVirtualPath { path: path.into() }
    }

    pub fn unknown_workspace(alias: impl Into<String>) -> Self {
        Self::UnknownWorkspace {
            alias: alias.into(),
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<std::io::Error> for OctoError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<VcsError> for OctoError {
    fn from(error: VcsError) -> Self {
        let (command, exit_code) = match &error {
            VcsError::CommandFailed {
                command, exit_code, ..
            } => (command.clone(), Some(*exit_code)),
            _ => (String::new(), None),
        };
        Self::command_error_with_source("Version control operation failed", command, exit_code, error)
    }
}

impl From<serde_yaml::Error> for OctoError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML serialization failed", error)
    }
}

impl From<serde_json::Error> for OctoError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization_error_with_source("JSON serialization failed", error)
    }
}
