pub mod universe;
pub mod workspace;

pub use universe::Universe;
pub use workspace::{ProjectTriple, ProjectVisitor, Workspace};
