use crate::config::StoreConfig;
use crate::lookup::VaultCatalog;
use crate::secrets::{StoreRegistry, VaultStore};
use crate::traits::{FileSystem, Output, RealFileSystem, TerminalOutput};
use anyhow::Result;
use std::sync::Arc;

/// Application context that holds all dependencies for dependency injection
#[derive(Clone)]
pub struct Context {
    pub fs: Arc<dyn FileSystem>,
    pub output: Arc<dyn Output>,
    /// Stores used to resolve reference tokens
    pub stores: StoreRegistry,
    /// Vault metadata access for the list/versions commands
    pub catalog: Arc<dyn VaultCatalog>,
}

impl Context {
    /// Create a new context with real implementations (for production use)
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let vault = Arc::new(VaultStore::from_config(config)?);
        let stores = StoreRegistry::with_vault(Arc::clone(&vault), config);
        tracing::debug!(kinds = ?stores.supported_kinds(), "configured secret stores");

        Ok(Self {
            fs: Arc::new(RealFileSystem),
            output: Arc::new(TerminalOutput),
            stores,
            catalog: vault,
        })
    }

    /// Create a test context with specific mock implementations
    #[cfg(test)]
    pub fn test_with(
        fs: Arc<dyn FileSystem>,
        output: Arc<dyn Output>,
        stores: StoreRegistry,
        catalog: Arc<dyn VaultCatalog>,
    ) -> Self {
        Self {
            fs,
            output,
            stores,
            catalog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::StoreKind;

    #[test]
    fn test_vault_client_shared_by_resolver_and_catalog() {
        let ctx = Context::new(&StoreConfig::default()).unwrap();

        let resolver_vault = ctx.stores.get(StoreKind::Vault).unwrap();
        assert_eq!(
            Arc::as_ptr(&resolver_vault).cast::<()>(),
            Arc::as_ptr(&ctx.catalog).cast::<()>()
        );
    }
}
