/// Infrastructure layer modules
///
/// Concrete implementations of external system interactions, currently the
/// git command line behind [`vcs::VcsOperations`].
pub mod vcs;

pub use vcs::{GitVcs, VcsError, VcsOperations};
