//! Version control collaborator used by repository actions.

pub mod git_vcs;
pub mod vcs_interface;

pub use git_vcs::GitVcs;
pub use vcs_interface::{BranchSummary, CommandOutput, VcsError, VcsOperations};
