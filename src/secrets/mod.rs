//! Backing stores for secret references.
//!
//! This module provides read access to HashiCorp Vault and AWS Secrets Manager
//! behind a single `SecretStore` trait, and a registry that picks the store for
//! a reference token by its prefix.

mod aws;
mod error;
mod provider;
mod registry;
mod vault;

pub use aws::SecretsManagerStore;
pub use error::{SecretError, SecretResult};
#[cfg(test)]
pub use provider::MockSecretStore;
pub use provider::{SecretRequest, SecretStore, StoreKind};
pub use registry::StoreRegistry;
pub use vault::VaultStore;
