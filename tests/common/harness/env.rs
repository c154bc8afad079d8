//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::{Q2jCommand, TestNote};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the library directory inside the environment.
pub const LIBRARY_DIR: &str = "Notes.qvlibrary";

/// Isolated test environment with a Quiver library and an output root.
///
/// Creates a temp directory that is automatically cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new environment with an empty library.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        std::fs::create_dir_all(root.join(LIBRARY_DIR)).expect("Failed to create library");
        std::fs::create_dir_all(root.join("home")).expect("Failed to create home");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the `.qvlibrary` directory.
    pub fn library(&self) -> PathBuf {
        self.root.join(LIBRARY_DIR)
    }

    /// Returns the output root used by [`Q2jCommand::convert`].
    pub fn output(&self) -> PathBuf {
        self.root.join("site")
    }

    /// Adds a notebook with a display name and returns its directory.
    pub fn add_notebook(&self, uuid: &str, name: &str) -> PathBuf {
        let dir = self.library().join(format!("{uuid}.qvnotebook"));
        std::fs::create_dir_all(&dir).expect("Failed to create notebook");
        let meta = serde_json::json!({"name": name, "uuid": uuid});
        std::fs::write(dir.join("meta.json"), meta.to_string()).expect("Failed to write meta");
        dir
    }

    /// Adds a note to a notebook created with [`TestEnv::add_notebook`].
    pub fn add_note(&self, notebook_uuid: &str, note: &TestNote) -> PathBuf {
        let dir = self.library().join(format!("{notebook_uuid}.qvnotebook"));
        note.write_to(&dir)
    }

    /// Adds a note directly under the library, outside any notebook.
    pub fn add_loose_note(&self, note: &TestNote) -> PathBuf {
        note.write_to(&self.library())
    }

    /// Writes a file to the test environment and returns its path.
    ///
    /// Useful for templates and config files.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Reads a file under the output root.
    pub fn read_output(&self, relative: &str) -> String {
        let path = self.output().join(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Creates a command isolated from the user's config.
    pub fn cmd(&self) -> Q2jCommand {
        Q2jCommand::new().home(&self.root.join("home"))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_library() {
        let env = TestEnv::new();
        assert!(env.library().is_dir());
        assert!(env.library().ends_with(LIBRARY_DIR));
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_writes_note_tree() {
        let env = TestEnv::new();
        env.add_notebook("NB1", "Tech");
        let dir = env.add_note(
            "NB1",
            &TestNote::new("N1", "Hello").resource("a.png", b"png"),
        );

        assert!(dir.ends_with("NB1.qvnotebook/N1.qvnote"));
        assert!(dir.join("meta.json").is_file());
        assert!(dir.join("content.json").is_file());
        assert!(dir.join("resources/a.png").is_file());
    }
}
