use super::encoding::Mode;
use super::token::{ReferenceToken, TokenScanner};
use crate::secrets::{SecretError, SecretResult, StoreRegistry};
use indexmap::IndexMap;

/// Resolves reference tokens in a mapping of entries against the registered stores.
pub struct SecretReferenceResolver {
    registry: StoreRegistry,
    scanner: TokenScanner,
}

impl SecretReferenceResolver {
    pub fn new(registry: StoreRegistry) -> Self {
        Self {
            registry,
            scanner: TokenScanner::new(),
        }
    }

    /// Resolve every entry, then apply `mode`.
    ///
    /// The output has the same keys in the same order. Any failure aborts the
    /// whole mapping; there is no partial result.
    pub fn resolve(
        &self,
        entries: &IndexMap<String, String>,
        mode: Mode,
    ) -> SecretResult<IndexMap<String, String>> {
        let mut resolved = IndexMap::with_capacity(entries.len());

        for (name, value) in entries {
            let value = self.resolve_value(value)?;
            resolved.insert(name.clone(), mode.apply(name, value)?);
        }

        tracing::info!(entries = resolved.len(), %mode, "resolved mapping");

        Ok(resolved)
    }

    /// Replace every reference token in `value` with its secret.
    ///
    /// All tokens are parsed before the first store read. Reads go to Vault
    /// first, then Secrets Manager, then legacy references; substitution uses
    /// the positions captured by the scan.
    pub fn resolve_value(&self, value: &str) -> SecretResult<String> {
        let tokens = self.scanner.scan(value)?;
        if tokens.is_empty() {
            return Ok(value.to_string());
        }

        let mut read_order: Vec<usize> = (0..tokens.len()).collect();
        read_order.sort_by_key(|&i| (tokens[i].kind, tokens[i].range.start));

        let mut payloads: Vec<Option<String>> = vec![None; tokens.len()];
        for i in read_order {
            payloads[i] = Some(self.read_token(&tokens[i])?);
        }

        let mut output = String::with_capacity(value.len());
        let mut cursor = 0;
        for (token, payload) in tokens.iter().zip(payloads) {
            output.push_str(&value[cursor..token.range.start]);
            output.push_str(payload.as_deref().unwrap_or_default());
            cursor = token.range.end;
        }
        output.push_str(&value[cursor..]);

        tracing::debug!(tokens = tokens.len(), "substituted references");

        Ok(output)
    }

    fn read_token(&self, token: &ReferenceToken<'_>) -> SecretResult<String> {
        let store = self.registry.get(token.kind).ok_or_else(|| {
            SecretError::unavailable(token.kind.prefix(), "no store is configured for this prefix")
        })?;

        tracing::debug!(
            prefix = token.kind.prefix(),
            store = store.get_description(),
            "dispatching reference"
        );

        store.read(&token.request())
    }
}
