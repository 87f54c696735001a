//! Read-only Vault lookups that sit beside the resolver: folder listing and
//! per-secret version metadata for KV v2 mounts.

use crate::secrets::{SecretResult, VaultStore};
use indexmap::IndexMap;

/// The Vault operations the lookups need
pub trait VaultCatalog: Send + Sync {
    /// Child key names directly under `path`
    fn list_keys(&self, path: &str, mount_point: &str) -> SecretResult<Vec<String>>;

    /// Current version of the secret at `path`
    fn current_version(&self, path: &str, mount_point: &str) -> SecretResult<u64>;
}

impl VaultCatalog for VaultStore {
    fn list_keys(&self, path: &str, mount_point: &str) -> SecretResult<Vec<String>> {
        self.list_secrets(path, mount_point)
    }

    fn current_version(&self, path: &str, mount_point: &str) -> SecretResult<u64> {
        self.read_secret_version(path, mount_point)
    }
}

/// List child folders under each path, concatenated in path order.
pub fn list_secret_folders(
    catalog: &dyn VaultCatalog,
    paths: &[String],
    mount_point: &str,
) -> SecretResult<Vec<String>> {
    let mut folders = Vec::new();

    for path in paths {
        folders.extend(catalog.list_keys(path, mount_point)?);
    }

    Ok(folders)
}

/// Map every child under each path to its current version.
///
/// One list call per path plus one read per child. A child name seen under
/// more than one path keeps the version of the last path.
pub fn get_secret_versions(
    catalog: &dyn VaultCatalog,
    paths: &[String],
    mount_point: &str,
) -> SecretResult<IndexMap<String, u64>> {
    let mut versions = IndexMap::new();

    for path in paths {
        for folder in catalog.list_keys(path, mount_point)? {
            let child = format!("{}/{}", path.trim_end_matches('/'), folder);
            let version = catalog.current_version(&child, mount_point)?;
            versions.insert(folder, version);
        }
    }

    tracing::info!(secrets = versions.len(), mount_point, "collected secret versions");

    Ok(versions)
}

/// In-memory catalog for tests
#[cfg(test)]
pub struct MockVaultCatalog {
    pub folders: std::collections::HashMap<String, Vec<String>>,
    pub versions: std::collections::HashMap<String, u64>,
    pub calls: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockVaultCatalog {
    pub fn new() -> Self {
        Self {
            folders: std::collections::HashMap::new(),
            versions: std::collections::HashMap::new(),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_folder(mut self, path: &str, children: &[&str]) -> Self {
        self.folders.insert(
            path.to_string(),
            children.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn with_version(mut self, path: &str, version: u64) -> Self {
        self.versions.insert(path.to_string(), version);
        self
    }
}

#[cfg(test)]
impl VaultCatalog for MockVaultCatalog {
    fn list_keys(&self, path: &str, mount_point: &str) -> SecretResult<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("list {}:{}", mount_point, path));
        self.folders
            .get(path)
            .cloned()
            .ok_or_else(|| crate::secrets::SecretError::unresolved("mock", path, "keys"))
    }

    fn current_version(&self, path: &str, mount_point: &str) -> SecretResult<u64> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("read {}:{}", mount_point, path));
        self.versions
            .get(path)
            .copied()
            .ok_or_else(|| crate::secrets::SecretError::unresolved("mock", path, "version"))
    }
}
