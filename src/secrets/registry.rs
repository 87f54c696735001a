//! Store registry for reference token handlers.
//!
//! Maps each token prefix to the store that resolves it.

use super::{SecretStore, SecretsManagerStore, StoreKind, VaultStore};
use crate::config::StoreConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of stores, keyed by the token prefix they handle.
#[derive(Clone)]
pub struct StoreRegistry {
    stores: HashMap<StoreKind, Arc<dyn SecretStore>>,
}

impl StoreRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
        }
    }

    /// Create a registry with all built-in stores configured from `config`,
    /// resolving `vault_path` references through the given Vault client.
    pub fn with_vault(vault: Arc<VaultStore>, config: &StoreConfig) -> Self {
        Self::new()
            .with_store(StoreKind::Vault, vault)
            .with_store(
                StoreKind::SecretsManager,
                Arc::new(SecretsManagerStore::new(config.aws_region.clone())),
            )
            .with_store(
                StoreKind::Legacy,
                Arc::new(SecretsManagerStore::legacy(config.legacy_aws_region.clone())),
            )
    }

    /// Register (or replace) the store for a token kind.
    pub fn with_store(mut self, kind: StoreKind, store: Arc<dyn SecretStore>) -> Self {
        self.stores.insert(kind, store);
        self
    }

    /// Get the store for a token kind.
    ///
    /// Returns None if no store is registered for the given kind.
    pub fn get(&self, kind: StoreKind) -> Option<Arc<dyn SecretStore>> {
        self.stores.get(&kind).cloned()
    }

    /// Token kinds with a registered store, in resolution order.
    pub fn supported_kinds(&self) -> Vec<StoreKind> {
        StoreKind::ALL
            .into_iter()
            .filter(|kind| self.stores.contains_key(kind))
            .collect()
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::MockSecretStore;

    fn default_registry() -> StoreRegistry {
        let config = StoreConfig::default();
        let vault = Arc::new(VaultStore::from_config(&config).unwrap());
        StoreRegistry::with_vault(vault, &config)
    }

    #[test]
    fn test_registry_with_vault_has_all_kinds() {
        let registry = default_registry();
        assert_eq!(registry.supported_kinds(), StoreKind::ALL.to_vec());

        assert_eq!(registry.get(StoreKind::Vault).unwrap().get_type(), "vault");
        assert_eq!(
            registry.get(StoreKind::SecretsManager).unwrap().get_type(),
            "aws_secrets_manager"
        );
        assert_eq!(
            registry.get(StoreKind::Legacy).unwrap().get_type(),
            "aws_secrets_manager_legacy"
        );
    }

    #[test]
    fn test_registry_empty() {
        let registry = StoreRegistry::new();
        assert!(registry.get(StoreKind::Vault).is_none());
        assert!(registry.supported_kinds().is_empty());
    }

    #[test]
    fn test_with_store_replaces() {
        let registry = default_registry()
            .with_store(StoreKind::Vault, Arc::new(MockSecretStore::new("mock")));

        assert_eq!(registry.get(StoreKind::Vault).unwrap().get_type(), "mock");
    }
}
