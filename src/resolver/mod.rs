//! Secret reference resolution.
//!
//! Scans configuration values for `vault_path:`, `asm_path:` and
//! `secret_path:` references, replaces each with the secret it points to and
//! optionally base64-encodes the result for Kubernetes Secret data.

mod encoding;
#[allow(clippy::module_inception)]
mod resolver;
mod token;

pub use encoding::Mode;
pub use resolver::SecretReferenceResolver;
