use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
#[cfg(test)]
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, RwLock},
};

/// Path argument that stands for standard input
pub const STDIN_PATH: &str = "-";

/// Trait for filesystem operations to enable testing with mocks
pub trait FileSystem: Send + Sync {
    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write string contents to file
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;

    /// Read standard input to the end
    fn read_stdin(&self) -> Result<String>;

    /// Read `source`, treating `-` as standard input
    fn read_input(&self, source: &str) -> Result<String> {
        if source == STDIN_PATH {
            self.read_stdin()
        } else {
            self.read_to_string(Path::new(source))
        }
    }
}

/// Real filesystem implementation using std::fs
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directory: {:?}", parent))?;
        }

        std::fs::write(path, contents).with_context(|| format!("Failed to write file: {:?}", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_stdin(&self) -> Result<String> {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read standard input")?;
        Ok(buffer)
    }
}

/// Mock filesystem implementation for testing (in-memory)
#[cfg(test)]
pub struct MockFileSystem {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
    stdin: Option<String>,
}

#[cfg(test)]
impl MockFileSystem {
    /// Create new empty mock filesystem
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(HashMap::new())),
            stdin: None,
        }
    }

    /// Seed a file
    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(PathBuf::from(path), contents.to_string());
        self
    }

    /// Seed standard input
    pub fn with_stdin(mut self, contents: &str) -> Self {
        self.stdin = Some(contents.to_string());
        self
    }

    /// Get captured file contents for testing assertions
    pub fn get_file_contents(&self, path: &Path) -> Option<String> {
        self.files.read().unwrap().get(path).cloned()
    }
}

#[cfg(test)]
impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .with_context(|| format!("File not found in mock filesystem: {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    fn read_stdin(&self) -> Result<String> {
        self.stdin
            .clone()
            .context("No standard input in mock filesystem")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_dispatches_on_dash() {
        let fs = MockFileSystem::new()
            .with_file("values.yaml", "A: file")
            .with_stdin("A: stdin");

        assert_eq!(fs.read_input("values.yaml").unwrap(), "A: file");
        assert_eq!(fs.read_input("-").unwrap(), "A: stdin");
    }

    #[test]
    fn test_real_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out/nested/secret.yaml");

        RealFileSystem.write(&target, "data: {}\n").unwrap();

        assert!(RealFileSystem.exists(&target));
        assert_eq!(
            RealFileSystem.read_to_string(&target).unwrap(),
            "data: {}\n"
        );
    }

    #[test]
    fn test_mock_missing_file_fails() {
        let fs = MockFileSystem::new();
        assert!(fs.read_to_string(Path::new("missing.yaml")).is_err());
        assert!(fs.read_stdin().is_err());
    }
}
