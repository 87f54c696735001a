//! Store connection settings.
//!
//! Values come from the CLI's global flags, which clap fills from the
//! environment (`VAULT_ADDR`, `VAULT_TOKEN`, `VAULT_NAMESPACE`, `AWS_REGION`)
//! when the flag is not given.

use std::path::Path;

/// Namespace sent to Vault when none is configured
pub const DEFAULT_VAULT_NAMESPACE: &str = "admin";

/// Connection settings for every backing store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub vault_addr: Option<String>,
    pub vault_token: Option<String>,
    pub vault_namespace: String,
    /// Region for `asm_path` references (falls back to the store default)
    pub aws_region: Option<String>,
    /// Region for `secret_path` references (falls back to the SDK default chain)
    pub legacy_aws_region: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            vault_addr: None,
            vault_token: None,
            vault_namespace: DEFAULT_VAULT_NAMESPACE.to_string(),
            aws_region: None,
            legacy_aws_region: None,
        }
    }
}

impl StoreConfig {
    /// Build a config from CLI/environment values.
    ///
    /// Without an explicit token, `~/.vault-token` is used if present.
    pub fn new(
        vault_addr: Option<String>,
        vault_token: Option<String>,
        vault_namespace: Option<String>,
        aws_region: Option<String>,
    ) -> Self {
        let vault_token = non_empty(vault_token).or_else(|| {
            dirs::home_dir().and_then(|home| read_token_file(&home.join(".vault-token")))
        });
        let aws_region = non_empty(aws_region);

        Self {
            vault_addr: non_empty(vault_addr),
            vault_token,
            vault_namespace: vault_namespace.unwrap_or_else(|| DEFAULT_VAULT_NAMESPACE.to_string()),
            legacy_aws_region: aws_region.clone(),
            aws_region,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_token_file(path: &Path) -> Option<String> {
    let token = std::fs::read_to_string(path).ok()?;
    tracing::debug!(path = %path.display(), "using Vault token file");
    non_empty(Some(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace() {
        assert_eq!(StoreConfig::default().vault_namespace, "admin");

        let config = StoreConfig::new(None, Some("t".to_string()), None, None);
        assert_eq!(config.vault_namespace, "admin");
    }

    #[test]
    fn test_explicit_values() {
        let config = StoreConfig::new(
            Some("https://vault.example.com".to_string()),
            Some("s.token".to_string()),
            Some("team-a".to_string()),
            Some("us-east-1".to_string()),
        );

        assert_eq!(config.vault_addr.as_deref(), Some("https://vault.example.com"));
        assert_eq!(config.vault_token.as_deref(), Some("s.token"));
        assert_eq!(config.vault_namespace, "team-a");
        assert_eq!(config.aws_region.as_deref(), Some("us-east-1"));
        assert_eq!(config.legacy_aws_region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = StoreConfig::new(Some("  ".to_string()), Some("t".to_string()), None, Some(String::new()));
        assert_eq!(config.vault_addr, None);
        assert_eq!(config.aws_region, None);
        assert_eq!(config.legacy_aws_region, None);
    }

    #[test]
    fn test_read_token_file_trims() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".vault-token");
        std::fs::write(&path, "s.abc123\n").unwrap();

        assert_eq!(read_token_file(&path), Some("s.abc123".to_string()));
        assert_eq!(read_token_file(&dir.path().join("missing")), None);
    }
}
