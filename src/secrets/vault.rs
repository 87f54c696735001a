//! HashiCorp Vault store implementation.
//!
//! Talks to the Vault HTTP API with a blocking client. Secret reads go to
//! `/v1/{path}` as given in the token (KV v2 paths carry their own `data/`
//! segment); the folder and version lookups use the KV v2 `metadata/` and
//! `data/` endpoints under an explicit mount point.

use super::error::{SecretError, SecretResult};
use super::provider::{SecretRequest, SecretStore, scalar_to_string};
use crate::config::StoreConfig;
use serde_json::Value;
use url::Url;

const DESCRIPTION: &str = "HashiCorp Vault";

/// HashiCorp Vault store.
pub struct VaultStore {
    http: reqwest::blocking::Client,
    address: Option<String>,
    token: Option<String>,
    namespace: String,
}

impl VaultStore {
    /// Create a new Vault store.
    ///
    /// A missing address is only reported once a read is attempted.
    pub fn new(
        address: Option<String>,
        token: Option<String>,
        namespace: impl Into<String>,
    ) -> SecretResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("vaultfill/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SecretError::unavailable(DESCRIPTION, e.to_string()))?;

        Ok(Self {
            http,
            address,
            token,
            namespace: namespace.into(),
        })
    }

    pub fn from_config(config: &StoreConfig) -> SecretResult<Self> {
        Self::new(
            config.vault_addr.clone(),
            config.vault_token.clone(),
            config.vault_namespace.clone(),
        )
    }

    /// List the child keys directly under `path` in a KV v2 mount.
    pub fn list_secrets(&self, path: &str, mount_point: &str) -> SecretResult<Vec<String>> {
        let mut url = self.endpoint(&[mount_point, "metadata", path])?;
        url.query_pairs_mut().append_pair("list", "true");

        tracing::debug!(store = "vault", mount_point, path, "listing secrets");

        let body = self
            .get_json(url)?
            .ok_or_else(|| SecretError::unresolved(DESCRIPTION, path, "keys"))?;

        let keys = body
            .get("data")
            .and_then(|d| d.get("keys"))
            .and_then(Value::as_array)
            .ok_or_else(|| SecretError::invalid_payload(path, "list response has no data.keys"))?;

        Ok(keys
            .iter()
            .filter_map(|k| k.as_str().map(str::to_string))
            .collect())
    }

    /// Read the current version number of the secret at `path` in a KV v2 mount.
    pub fn read_secret_version(&self, path: &str, mount_point: &str) -> SecretResult<u64> {
        let url = self.endpoint(&[mount_point, "data", path])?;

        tracing::debug!(store = "vault", mount_point, path, "reading secret version");

        let body = self
            .get_json(url)?
            .ok_or_else(|| SecretError::unresolved(DESCRIPTION, path, "metadata.version"))?;

        body.get("data")
            .and_then(|d| d.get("metadata"))
            .and_then(|m| m.get("version"))
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                SecretError::invalid_payload(path, "response has no data.metadata.version")
            })
    }

    /// Build `{address}/v1/{parts...}`, percent-encoding every path segment.
    fn endpoint(&self, parts: &[&str]) -> SecretResult<Url> {
        let address = self
            .address
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| SecretError::unavailable(DESCRIPTION, "VAULT_ADDR is not set"))?;

        let mut url = Url::parse(address).map_err(|e| {
            SecretError::unavailable(DESCRIPTION, format!("invalid VAULT_ADDR '{}': {}", address, e))
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                SecretError::unavailable(
                    DESCRIPTION,
                    format!("VAULT_ADDR '{}' cannot carry a path", address),
                )
            })?;
            segments.pop_if_empty().push("v1");
            segments.extend(
                parts
                    .iter()
                    .flat_map(|part| part.split('/'))
                    .filter(|segment| !segment.is_empty()),
            );
        }

        Ok(url)
    }

    /// GET a Vault endpoint. `Ok(None)` means the path does not exist.
    fn get_json(&self, url: Url) -> SecretResult<Option<Value>> {
        let endpoint = url.path().to_string();
        let mut request = self.http.get(url).header("Accept", "application/json");

        if let Some(token) = &self.token {
            request = request.header("X-Vault-Token", token);
        }
        if !self.namespace.is_empty() {
            request = request.header("X-Vault-Namespace", &self.namespace);
        }

        let response = request
            .send()
            .map_err(|e| SecretError::unavailable(DESCRIPTION, e.to_string()))?;

        match response.status().as_u16() {
            200 => {
                let body = response
                    .json::<Value>()
                    .map_err(|e| SecretError::invalid_payload(&endpoint, e.to_string()))?;
                Ok(Some(body))
            }
            // KV v2 answers 204 for a path that holds no data
            204 | 404 => Ok(None),
            401 | 403 => Err(SecretError::unavailable(
                DESCRIPTION,
                "permission denied (check VAULT_TOKEN and VAULT_NAMESPACE)",
            )),
            status => Err(SecretError::unavailable(
                DESCRIPTION,
                format!("unexpected response status {}", status),
            )),
        }
    }
}

impl SecretStore for VaultStore {
    fn get_type(&self) -> &str {
        "vault"
    }

    fn get_description(&self) -> &str {
        DESCRIPTION
    }

    fn read(&self, request: &SecretRequest<'_>) -> SecretResult<String> {
        let url = self.endpoint(&[request.path])?;

        tracing::debug!(
            store = "vault",
            path = request.path,
            key = request.key,
            "reading secret"
        );

        let body = self
            .get_json(url)?
            .ok_or_else(|| SecretError::unresolved(DESCRIPTION, request.path, request.key))?;

        let data = body
            .get("data")
            .and_then(|d| d.get("data"))
            .and_then(Value::as_object)
            .ok_or_else(|| {
                SecretError::invalid_payload(request.path, "response has no data.data object")
            })?;

        data.get(request.key)
            .and_then(scalar_to_string)
            .ok_or_else(|| SecretError::unresolved(DESCRIPTION, request.path, request.key))
    }
}
