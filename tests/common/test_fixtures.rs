//! Test fixtures for declaration files and workspace trees on disk

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a declaration file and workspace roots.
pub struct DeclarationFixture {
    pub dir: TempDir,
    pub definition_file: PathBuf,
}

impl DeclarationFixture {
    /// Writes `contents` verbatim as the declaration file.
    pub fn with_contents(contents: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let definition_file = dir.path().join(".octo").join("workspaces");
        fs::create_dir_all(definition_file.parent().unwrap()).unwrap();
        fs::write(&definition_file, contents).unwrap();
        Self {
            dir,
            definition_file,
        }
    }

    /// Two workspaces rooted inside the fixture directory.
    ///
    /// `w1` holds `common`, `reader` and `game`; `w2` holds `common` and `tools`.
    pub fn two_workspaces() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let w1 = dir.path().join("w1");
        let w2 = dir.path().join("w2");
        let contents = format!(
            "# shared\nprojects {{ common }}\n\nworkspace w1 -> {} {{\n  reader\n  game\n}}\nworkspace w2 -> {} {{ tools }}\n",
            w1.display(),
            w2.display()
        );
        let definition_file = dir.path().join("workspaces");
        fs::write(&definition_file, contents).unwrap();
        Self {
            dir,
            definition_file,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Root directory of a workspace created by [`Self::two_workspaces`].
    pub fn workspace_root(&self, alias: &str) -> PathBuf {
        self.dir.path().join(alias)
    }

    /// Creates the directory of each project so actions do not skip it.
    pub fn create_projects(&self, alias: &str, projects: &[&str]) {
        for project in projects {
            fs::create_dir_all(self.workspace_root(alias).join(project)).unwrap();
        }
    }
}
