//! # octo - workspaces of git projects
//!
//! `octo` reads a small declaration file listing workspaces (named root
//! directories) and the projects checked out beneath them, then runs git
//! over every project: pull, push, checkout, clone and status.
//!
//! ## Declaration file
//!
//! ```text
//! # default projects, added to every workspace declared after them
//! projects {
//!     dotfiles
//! }
//!
//! workspace w1 -> /home/me/src {
//!     reader
//!     game
//! }
//! ```
//!
//! Tokens are separated by whitespace, `#` starts a comment running to the
//! end of the line, and `{` and `}` delimit project blocks.
//!
//! ## Architecture
//!
//! - [`domain`]: collections, the declaration parser and the [`Universe`](domain::entities::Universe) registry
//! - [`application`]: the use case applying one action across every project
//! - [`infrastructure`]: the git command-line collaborator
//! - [`presentation`]: CLI interface and terminal output
//! - [`common`]: errors, configuration and the error sink
//!
//! ## Using the library
//!
//! ```rust
//! use octo::domain::entities::Universe;
//!
//! let universe = Universe::parse_str("projects { dotfiles } workspace w1 -> /srv/code { game }");
//! assert_eq!(universe.workspace_path("w1"), Some("/srv/code"));
//!
//! let mut paths = Vec::new();
//! universe.accept(&mut |_name: &str, path: &str, project: &str| {
//!     paths.push(format!("{path}/{project}"));
//! });
//! assert_eq!(paths, vec!["/srv/code/dotfiles", "/srv/code/game"]);
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::OctoError;
pub use crate::common::result::OctoResult as Result;
