//! Registry of every workspace declared in a declaration file.
//!
//! The universe drains one byte stream through a [`DeclarationParser`],
//! building workspaces from the events as they arrive. Once loading is done
//! it is read-only: callers look workspaces up by alias or visit every
//! `(name, path, project)` triple in declaration order.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use super::workspace::{ProjectTriple, ProjectVisitor, Workspace};
use crate::common::error::OctoError;
use crate::common::error_sink::{ErrorSink, FILE_NOT_FOUND, IO_FAILURE};
use crate::common::result::{OctoResult, ResultExt};
use crate::domain::collections::{ChainedHashMap, LinkedList};
use crate::domain::declaration::{DeclarationConsumer, DeclarationParser, Diagnostic, ParseMode};
use crate::domain::value_objects::VirtualPath;

const READ_BUFFER_SIZE: usize = 8 * 1024;

#[derive(Debug, Default)]
pub struct Universe {
    default_projects: LinkedList<Arc<str>>,
    workspace_by_alias: ChainedHashMap<usize>,
    workspaces: Vec<Workspace>,
    diagnostics: Vec<Diagnostic>,
}

impl Universe {
    /// An empty registry with no workspaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the declaration file at `path`.
    ///
    /// A missing or unreadable file is published to `sink` and yields an
    /// empty (or partially loaded) registry. Grammar violations are only
    /// fatal in [`ParseMode::Strict`].
    pub fn open(path: &Path, mode: ParseMode, sink: &mut dyn ErrorSink) -> OctoResult<Self> {
        let mut universe = Self::new();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                sink.publish(FILE_NOT_FOUND, &format!("File not found: {}", path.display()));
                return Ok(universe);
            }
            Err(error) => {
                sink.publish(
                    IO_FAILURE,
                    &format!("Cannot open '{}': {error}", path.display()),
                );
                return Ok(universe);
            }
        };

        match universe.load(BufReader::new(file), mode, Some(path)) {
            Ok(()) => Ok(universe),
            Err(OctoError::FileSystemError { message, source, .. }) => {
                let detail = source.map(|e| e.to_string()).unwrap_or_default();
                sink.publish(IO_FAILURE, &format!("{message}: {detail}"));
                Ok(universe)
            }
            Err(error) => Err(error),
        }
    }

    /// Loads declarations from any byte source.
    pub fn from_reader<R: Read>(reader: R, mode: ParseMode) -> OctoResult<Self> {
        let mut universe = Self::new();
        universe.load(reader, mode, None)?;
        Ok(universe)
    }

    /// Loads declarations from text, keeping every diagnostic.
    pub fn parse_str(text: &str) -> Self {
        let mut universe = Self::new();
        let mut parser = DeclarationParser::new(&mut universe);
        parser.feed(text.as_bytes());
        parser.finish();
        let (_, diagnostics) = parser.into_parts();
        universe.diagnostics = diagnostics;
        universe
    }

    fn load<R: Read>(
        &mut self,
        mut reader: R,
        mode: ParseMode,
        file: Option<&Path>,
    ) -> OctoResult<()> {
        let file_path = file.map(Path::to_path_buf);
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        let mut parser = DeclarationParser::new(&mut *self);
        let mut first_violation = None;

        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => {
                    return Err(error).with_filesystem_error(
                        format!("Failed to read declarations on line {}", parser.line()),
                        file_path,
                    );
                }
            };
            for &byte in &buffer[..read] {
                if let Some(diagnostic) = parser.process_byte(byte) {
                    first_violation.get_or_insert(diagnostic);
                }
            }
            if mode == ParseMode::Strict && first_violation.is_some() {
                break;
            }
        }
        if let Some(diagnostic) = parser.finish() {
            first_violation.get_or_insert(diagnostic);
        }

        let (_, diagnostics) = parser.into_parts();
        for diagnostic in &diagnostics {
            warn!(file = ?file_path, "{diagnostic}");
        }
        self.diagnostics.extend(diagnostics);

        match (mode, first_violation) {
            (ParseMode::Strict, Some(diagnostic)) => Err(diagnostic.into_error(file_path)),
            _ => Ok(()),
        }
    }

    /// Declared path of the workspace `alias`.
    pub fn workspace_path(&self, alias: &str) -> Option<&str> {
        self.workspace(alias).map(Workspace::path)
    }

    pub fn workspace(&self, alias: &str) -> Option<&Workspace> {
        self.workspace_by_alias
            .get(alias)
            .map(|&index| &self.workspaces[index])
    }

    /// Workspaces in the order they were first declared.
    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    /// Projects applied to every workspace.
    pub fn default_projects(&self) -> impl Iterator<Item = &str> + '_ {
        self.default_projects.iter().map(|project| &**project)
    }

    /// Visits every project of every workspace in declaration order.
    pub fn accept<V: ProjectVisitor + ?Sized>(&self, visitor: &mut V) {
        for workspace in &self.workspaces {
            workspace.accept(visitor);
        }
    }

    pub fn triples(&self) -> Vec<ProjectTriple> {
        let mut triples = Vec::new();
        self.accept(&mut |name: &str, path: &str, project: &str| {
            triples.push(ProjectTriple::new(name, path, project));
        });
        triples
    }

    /// Directory addressed by `alias[/subpath]`, or `None` for an unknown alias.
    pub fn resolve_virtual_path(&self, virtual_path: &VirtualPath) -> Option<PathBuf> {
        let workspace = self.workspace(virtual_path.alias())?;
        Some(match virtual_path.subpath() {
            Some(subpath) => workspace.root_dir().join(subpath),
            None => workspace.root_dir(),
        })
    }

    /// Grammar violations found while loading.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }
}

impl DeclarationConsumer for Universe {
    fn add_project(&mut self, name: &str) {
        debug!(project = name, "default project");
        self.default_projects.push_back(Arc::from(name));
    }

    fn add_workspace(&mut self, alias: &str, path: &str) {
        debug!(alias, path, "workspace");
        let index = match self.workspace_by_alias.get(alias) {
            Some(&index) => {
                if self.workspaces[index].path() != path {
                    debug!(alias, path, "workspace re-declared, keeping first path");
                }
                index
            }
            None => {
                self.workspaces
                    .push(Workspace::new(Arc::from(alias), Arc::from(path)));
                let index = self.workspaces.len() - 1;
                self.workspace_by_alias.put(alias, index);
                index
            }
        };

        let workspace = &mut self.workspaces[index];
        self.default_projects.traverse(|project| {
            workspace.add_dir(Arc::clone(project));
        });
    }

    fn add_workspace_project(&mut self, alias: &str, project: &str) {
        debug!(alias, project, "workspace project");
        if let Some(&index) = self.workspace_by_alias.get(alias) {
            self.workspaces[index].add_dir(Arc::from(project));
        }
    }
}
