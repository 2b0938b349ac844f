use std::fmt;
use std::str::FromStr;

use crate::common::error::OctoError;

/// Address of a location inside a declared workspace: `alias` or `alias/sub/path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualPath {
    alias: String,
    subpath: Option<String>,
}

impl VirtualPath {
    pub fn new(value: &str) -> Result<Self, OctoError> {
        let trimmed = value.trim().trim_end_matches('/');
        let (alias, subpath) = match trimmed.split_once('/') {
            Some((alias, rest)) => (alias, Some(rest.trim_start_matches('/'))),
            None => (trimmed, None),
        };

        if alias.is_empty() || alias.chars().any(char::is_whitespace) {
            return Err(OctoError::invalid_virtual_path(value));
        }

        Ok(Self {
            alias: alias.to_string(),
            subpath: subpath.filter(|rest| !rest.is_empty()).map(str::to_string),
        })
    }

    /// Workspace alias, the first path segment.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Everything after the alias, usually a project name.
    pub fn subpath(&self) -> Option<&str> {
        self.subpath.as_deref()
    }
}

impl FromStr for VirtualPath {
    type Err = OctoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subpath {
            Some(subpath) => write!(f, "{}/{}", self.alias, subpath),
            None => f.write_str(&self.alias),
        }
    }
}
