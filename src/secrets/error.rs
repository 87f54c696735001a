use std::fmt;

/// Error types for secret reference resolution
#[derive(Debug)]
pub enum SecretError {
    /// Token does not split into at least a path and a key
    MalformedToken { token: String, reason: String },

    /// Path or key does not exist in the backing store
    UnresolvedReference {
        store: String,
        path: String,
        key: String,
    },

    /// Secret-mode value could not be base64-encoded
    Encoding { entry: String, reason: String },

    /// Backing store could not be reached (configuration, network or auth)
    StoreUnavailable { store: String, message: String },

    /// Store answered, but not with a document we can read
    InvalidPayload { path: String, message: String },
}

impl SecretError {
    pub fn unresolved(store: &str, path: &str, key: &str) -> Self {
        SecretError::UnresolvedReference {
            store: store.to_string(),
            path: path.to_string(),
            key: key.to_string(),
        }
    }

    pub fn unavailable(store: &str, message: impl Into<String>) -> Self {
        SecretError::StoreUnavailable {
            store: store.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_payload(path: &str, message: impl Into<String>) -> Self {
        SecretError::InvalidPayload {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretError::MalformedToken { token, reason } => {
                write!(f, "Malformed secret reference '{}': {}", token, reason)
            }
            SecretError::UnresolvedReference { store, path, key } => {
                write!(
                    f,
                    "Unresolved reference: key '{}' not found at '{}' in {}",
                    key, path, store
                )
            }
            SecretError::Encoding { entry, reason } => {
                write!(f, "Failed to encode value of '{}': {}", entry, reason)
            }
            SecretError::StoreUnavailable { store, message } => {
                write!(f, "{} is unavailable: {}", store, message)
            }
            SecretError::InvalidPayload { path, message } => {
                write!(f, "Invalid secret payload at '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for SecretError {}

/// Result type for secret resolution
pub type SecretResult<T> = Result<T, SecretError>;
