//! AWS Secrets Manager store implementation.

use super::error::{SecretError, SecretResult};
use super::provider::{SecretRequest, SecretStore, scalar_to_string};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

const DESCRIPTION: &str = "AWS Secrets Manager";

/// Region used by `asm_path` references when `AWS_REGION` is unset
pub const DEFAULT_REGION: &str = "eu-central-1";

/// How a fetched secret document is searched for the requested key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLayout {
    /// Top-level key only (`secret_path` references)
    Flat,
    /// Depth-first search through child objects, then one optional subkey level
    Nested,
}

/// AWS Secrets Manager store.
///
/// The SDK client is async, so reads are driven on a private current-thread
/// runtime. Client and runtime are built on the first read.
pub struct SecretsManagerStore {
    region: Option<String>,
    layout: DocumentLayout,
    connection: OnceCell<(tokio::runtime::Runtime, SecretsManagerClient)>,
}

impl SecretsManagerStore {
    /// Create a new store for `asm_path` references.
    pub fn new(region: Option<String>) -> Self {
        Self {
            region: Some(region.unwrap_or_else(|| DEFAULT_REGION.to_string())),
            layout: DocumentLayout::Nested,
            connection: OnceCell::new(),
        }
    }

    /// Create a store for `secret_path` references.
    ///
    /// With no region the SDK default provider chain picks one.
    pub fn legacy(region: Option<String>) -> Self {
        Self {
            region,
            layout: DocumentLayout::Flat,
            connection: OnceCell::new(),
        }
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn layout(&self) -> DocumentLayout {
        self.layout
    }

    fn connection(&self) -> SecretResult<&(tokio::runtime::Runtime, SecretsManagerClient)> {
        self.connection.get_or_try_init(|| {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| SecretError::unavailable(DESCRIPTION, e.to_string()))?;

            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = &self.region {
                loader = loader.region(Region::new(region.clone()));
            }
            let sdk_config = runtime.block_on(loader.load());

            tracing::debug!(store = "aws_secrets_manager", region = ?sdk_config.region(), "connected");

            Ok((runtime, SecretsManagerClient::new(&sdk_config)))
        })
    }

    /// Fetch the raw `SecretString` for a secret id.
    fn fetch_secret_string(&self, secret_id: &str) -> SecretResult<String> {
        let (runtime, client) = self.connection()?;

        let response = runtime
            .block_on(client.get_secret_value().secret_id(secret_id).send())
            .map_err(|err| {
                let not_found = err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception());
                if not_found {
                    SecretError::unresolved(DESCRIPTION, secret_id, "SecretString")
                } else {
                    SecretError::unavailable(DESCRIPTION, DisplayErrorContext(&err).to_string())
                }
            })?;

        response
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| SecretError::invalid_payload(secret_id, "secret has no SecretString"))
    }
}

impl SecretStore for SecretsManagerStore {
    fn get_type(&self) -> &str {
        match self.layout {
            DocumentLayout::Nested => "aws_secrets_manager",
            DocumentLayout::Flat => "aws_secrets_manager_legacy",
        }
    }

    fn get_description(&self) -> &str {
        DESCRIPTION
    }

    fn read(&self, request: &SecretRequest<'_>) -> SecretResult<String> {
        tracing::debug!(
            store = self.get_type(),
            region = self.region(),
            layout = ?self.layout(),
            path = request.path,
            key = request.key,
            subkey = ?request.subkey,
            "reading secret"
        );

        let raw = self.fetch_secret_string(request.path)?;
        let document = parse_document(request.path, &raw)?;

        lookup_document(&document, request, self.layout)
    }
}

/// Parse a `SecretString` into its top-level JSON object.
pub fn parse_document(secret_id: &str, raw: &str) -> SecretResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(SecretError::invalid_payload(
            secret_id,
            "secret is not a JSON object",
        )),
        Err(e) => Err(SecretError::invalid_payload(secret_id, e.to_string())),
    }
}

/// Locate the requested field in a parsed secret document.
///
/// Flat documents (no object-valued entries) are indexed by key directly.
/// Nested documents are searched depth-first for `key`; when the match is an
/// object the subkey selects the final field.
pub fn lookup_document(
    document: &Map<String, Value>,
    request: &SecretRequest<'_>,
    layout: DocumentLayout,
) -> SecretResult<String> {
    let unresolved = || SecretError::unresolved(DESCRIPTION, request.path, request.key);

    if layout == DocumentLayout::Flat || !has_child_object(document) {
        return document
            .get(request.key)
            .and_then(scalar_to_string)
            .ok_or_else(unresolved);
    }

    let found = find_key(document, request.key).ok_or_else(unresolved)?;

    match (found, request.subkey) {
        (Value::Object(child), Some(subkey)) => child
            .get(subkey)
            .and_then(scalar_to_string)
            .ok_or_else(|| SecretError::unresolved(DESCRIPTION, request.path, subkey)),
        (Value::Object(_), None) => Err(unresolved()),
        (_, Some(subkey)) => Err(SecretError::unresolved(DESCRIPTION, request.path, subkey)),
        (scalar, None) => scalar_to_string(scalar).ok_or_else(unresolved),
    }
}

fn has_child_object(document: &Map<String, Value>) -> bool {
    document.values().any(Value::is_object)
}

fn find_key<'a>(document: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = document.get(key) {
        return Some(value);
    }

    document
        .values()
        .filter_map(Value::as_object)
        .find_map(|child| find_key(child, key))
}
