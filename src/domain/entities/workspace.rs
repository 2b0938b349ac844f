use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::collections::LinkedHashSet;

/// Receives one `(workspace name, workspace path, project)` triple per visit.
pub trait ProjectVisitor {
    fn visit(&mut self, workspace_name: &str, workspace_path: &str, project: &str);
}

impl<F> ProjectVisitor for F
where
    F: FnMut(&str, &str, &str),
{
    fn visit(&mut self, workspace_name: &str, workspace_path: &str, project: &str) {
        self(workspace_name, workspace_path, project)
    }
}

/// An owned, flattened workspace/project pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectTriple {
    pub workspace_name: String,
    pub workspace_path: String,
    pub project: String,
}

impl ProjectTriple {
    pub fn new(workspace_name: &str, workspace_path: &str, project: &str) -> Self {
        Self {
            workspace_name: workspace_name.to_string(),
            workspace_path: workspace_path.to_string(),
            project: project.to_string(),
        }
    }

    /// `<workspace path>/<project>` as written in the declaration file.
    pub fn display_path(&self) -> String {
        format!("{}/{}", self.workspace_path, self.project)
    }
}

/// A named root directory and the projects checked out beneath it.
///
/// Name, path and project names are shared handles owned by the registry;
/// the workspace only keeps references to them.
#[derive(Debug, Clone)]
pub struct Workspace {
    name: Arc<str>,
    path: Arc<str>,
    projects: LinkedHashSet<Arc<str>>,
}

impl Workspace {
    pub fn new(name: Arc<str>, path: Arc<str>) -> Self {
        Self {
            name,
            path,
            projects: LinkedHashSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root path exactly as declared.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Adds a project directory; adding a known name again changes nothing.
    pub fn add_dir(&mut self, project: Arc<str>) -> bool {
        self.projects.add(project)
    }

    /// Project names in the order they were first added.
    pub fn projects(&self) -> impl Iterator<Item = &str> + '_ {
        self.projects.iter().map(|project| &**project)
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn contains_project(&self, project: &str) -> bool {
        self.projects.contains(project)
    }

    /// Calls `visitor` once per project, in insertion order.
    pub fn accept<V: ProjectVisitor + ?Sized>(&self, visitor: &mut V) {
        self.projects
            .traverse(|project| visitor.visit(&self.name, &self.path, project));
    }

    /// Root directory on disk, with a leading `~` expanded to the home directory.
    pub fn root_dir(&self) -> PathBuf {
        expand_home(&self.path)
    }

    /// Directory of `project` inside this workspace.
    pub fn project_dir(&self, project: &str) -> PathBuf {
        self.root_dir().join(project)
    }
}

fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => Path::new(path).to_path_buf(),
    }
}
