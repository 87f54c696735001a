use crate::commands::OutputFormat;
use crate::context::Context;
use crate::lookup::get_secret_versions;
use anyhow::{Context as _, Result};

/// Handles the 'versions' command - prints the current version of every
/// secret under the given Vault paths as JSON
pub struct VersionsCommand;

impl VersionsCommand {
    /// Execute the versions command
    pub fn execute(ctx: &Context, paths: &[String], mount_point: &str) -> Result<()> {
        let versions = get_secret_versions(&*ctx.catalog, paths, mount_point).with_context(
            || format!("Failed to read secret versions under mount '{}'", mount_point),
        )?;

        ctx.output.document(&OutputFormat::Json.render(&versions)?);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::MockVaultCatalog;
    use crate::secrets::StoreRegistry;
    use crate::traits::{MockFileSystem, MockOutput};
    use std::sync::Arc;

    #[test]
    fn test_versions_prints_json_object() {
        let catalog = MockVaultCatalog::new()
            .with_folder("apps/web", &["db", "api"])
            .with_version("apps/web/db", 4)
            .with_version("apps/web/api", 1);
        let output = Arc::new(MockOutput::new());
        let ctx = Context::test_with(
            Arc::new(MockFileSystem::new()),
            output.clone(),
            StoreRegistry::new(),
            Arc::new(catalog),
        );

        VersionsCommand::execute(&ctx, &["apps/web".to_string()], "kv").unwrap();

        assert_eq!(
            output.get_documents(),
            vec!["{\n  \"db\": 4,\n  \"api\": 1\n}\n"]
        );
    }

    #[test]
    fn test_versions_missing_version_fails() {
        let catalog = MockVaultCatalog::new().with_folder("apps/web", &["db"]);
        let ctx = Context::test_with(
            Arc::new(MockFileSystem::new()),
            Arc::new(MockOutput::new()),
            StoreRegistry::new(),
            Arc::new(catalog),
        );

        assert!(VersionsCommand::execute(&ctx, &["apps/web".to_string()], "kv").is_err());
    }
}
