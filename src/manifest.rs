//! Kubernetes manifest wrapping for resolved mappings.

use crate::resolver::Mode;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub api_version: String,
    pub kind: String,
    pub metadata: ManifestMetadata,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub secret_type: Option<String>,
    pub data: IndexMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct ManifestMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Manifest {
    /// Wrap resolved data in a ConfigMap (config mode) or an Opaque Secret
    /// (secret mode, whose values are already base64).
    pub fn wrap(
        name: &str,
        namespace: Option<&str>,
        mode: Mode,
        data: IndexMap<String, String>,
    ) -> Self {
        let (kind, secret_type) = match mode {
            Mode::Config => ("ConfigMap", None),
            Mode::Secret => ("Secret", Some("Opaque".to_string())),
        };

        Self {
            api_version: "v1".to_string(),
            kind: kind.to_string(),
            metadata: ManifestMetadata {
                name: name.to_string(),
                namespace: namespace.map(str::to_string),
            },
            secret_type,
            data,
        }
    }
}
