//! SecretStore trait and related types for reading secret payloads.

use super::error::SecretResult;
use serde_json::Value;

/// A single read against a backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretRequest<'a> {
    /// Store-specific lookup path (Vault path or Secrets Manager secret id)
    pub path: &'a str,
    /// Field name within the secret payload
    pub key: &'a str,
    /// Nested field, for multi-level JSON secrets
    pub subkey: Option<&'a str>,
}

impl<'a> SecretRequest<'a> {
    pub fn new(path: &'a str, key: &'a str) -> Self {
        Self {
            path,
            key,
            subkey: None,
        }
    }

    pub fn with_subkey(mut self, subkey: Option<&'a str>) -> Self {
        self.subkey = subkey;
        self
    }
}

/// Trait for backing store implementations.
///
/// Each store (Vault, AWS Secrets Manager) implements this trait to turn a
/// path/key pair into the plain string that replaces a reference token.
pub trait SecretStore: Send + Sync {
    /// Get the store type name (e.g., "vault", "aws_secrets_manager")
    fn get_type(&self) -> &str;

    /// Get human-readable description, used in error messages
    fn get_description(&self) -> &str;

    /// Read one field. Blocks until the store answers.
    fn read(&self, request: &SecretRequest<'_>) -> SecretResult<String>;
}

/// Reference token prefixes, one per handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoreKind {
    /// `vault_path:` - HashiCorp Vault
    Vault,
    /// `asm_path:` - AWS Secrets Manager with nested document support
    SecretsManager,
    /// `secret_path:` - AWS Secrets Manager, flat documents only
    Legacy,
}

impl StoreKind {
    /// All kinds, in the order their tokens are resolved
    pub const ALL: [StoreKind; 3] = [StoreKind::Vault, StoreKind::SecretsManager, StoreKind::Legacy];

    pub fn prefix(&self) -> &'static str {
        match self {
            StoreKind::Vault => "vault_path",
            StoreKind::SecretsManager => "asm_path",
            StoreKind::Legacy => "secret_path",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }

    /// Whether tokens of this kind may carry a subkey component
    pub fn accepts_subkey(&self) -> bool {
        matches!(self, StoreKind::SecretsManager)
    }
}

/// Render a JSON scalar the way it is substituted into a value.
///
/// Objects, arrays and nulls have no substitutable form.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// In-memory store for tests. Records every read it receives.
#[cfg(test)]
pub struct MockSecretStore {
    name: String,
    values: std::collections::HashMap<(String, String, Option<String>), String>,
    unavailable: bool,
    reads: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockSecretStore {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            values: std::collections::HashMap::new(),
            unavailable: false,
            reads: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// A store whose every read fails as if the backend were down
    pub fn unavailable(name: &str) -> Self {
        Self {
            unavailable: true,
            ..Self::new(name)
        }
    }

    pub fn with_value(mut self, path: &str, key: &str, value: &str) -> Self {
        self.values
            .insert((path.to_string(), key.to_string(), None), value.to_string());
        self
    }

    pub fn with_nested_value(mut self, path: &str, key: &str, subkey: &str, value: &str) -> Self {
        self.values.insert(
            (path.to_string(), key.to_string(), Some(subkey.to_string())),
            value.to_string(),
        );
        self
    }

    /// Reads received so far, formatted as "path key[ subkey]"
    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl SecretStore for MockSecretStore {
    fn get_type(&self) -> &str {
        &self.name
    }

    fn get_description(&self) -> &str {
        &self.name
    }

    fn read(&self, request: &SecretRequest<'_>) -> SecretResult<String> {
        let mut line = format!("{} {}", request.path, request.key);
        if let Some(subkey) = request.subkey {
            line.push(' ');
            line.push_str(subkey);
        }
        self.reads.lock().unwrap().push(line);

        if self.unavailable {
            return Err(super::SecretError::unavailable(&self.name, "connection refused"));
        }

        self.values
            .get(&(
                request.path.to_string(),
                request.key.to_string(),
                request.subkey.map(str::to_string),
            ))
            .cloned()
            .ok_or_else(|| super::SecretError::unresolved(&self.name, request.path, request.key))
    }
}
