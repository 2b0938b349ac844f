/// Receiver of the events produced while a declaration file is parsed.
///
/// Arguments borrow the parser's token buffers and are only valid for the
/// duration of the call; implementations copy whatever they keep.
pub trait DeclarationConsumer {
    /// A project belonging to every workspace.
    fn add_project(&mut self, name: &str);

    /// A workspace `alias` rooted at `path`, declared or re-declared.
    fn add_workspace(&mut self, alias: &str, path: &str);

    /// A project belonging only to the workspace `alias`.
    fn add_workspace_project(&mut self, alias: &str, project: &str);
}

impl<C: DeclarationConsumer + ?Sized> DeclarationConsumer for &mut C {
    fn add_project(&mut self, name: &str) {
        (**self).add_project(name);
    }

    fn add_workspace(&mut self, alias: &str, path: &str) {
        (**self).add_workspace(alias, path);
    }

    fn add_workspace_project(&mut self, alias: &str, project: &str) {
        (**self).add_workspace_project(alias, project);
    }
}

/// One recorded parser event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationEvent {
    Project(String),
    Workspace { alias: String, path: String },
    WorkspaceProject { alias: String, project: String },
}

impl DeclarationEvent {
    pub fn project(name: &str) -> Self {
        Self::Project(name.to_string())
    }

    pub fn workspace(alias: &str, path: &str) -> Self {
        Self::Workspace {
            alias: alias.to_string(),
            path: path.to_string(),
        }
    }

    pub fn workspace_project(alias: &str, project: &str) -> Self {
        Self::WorkspaceProject {
            alias: alias.to_string(),
            project: project.to_string(),
        }
    }
}

/// Records events in arrival order.
impl DeclarationConsumer for Vec<DeclarationEvent> {
    fn add_project(&mut self, name: &str) {
        self.push(DeclarationEvent::project(name));
    }

    fn add_workspace(&mut self, alias: &str, path: &str) {
        self.push(DeclarationEvent::workspace(alias, path));
    }

    fn add_workspace_project(&mut self, alias: &str, project: &str) {
        self.push(DeclarationEvent::workspace_project(alias, project));
    }
}
