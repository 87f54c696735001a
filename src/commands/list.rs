use crate::commands::OutputFormat;
use crate::context::Context;
use crate::lookup::list_secret_folders;
use anyhow::{Context as _, Result};

/// Handles the 'list' command - lists child folders under Vault paths
pub struct ListCommand;

impl ListCommand {
    /// Execute the list command
    pub fn execute(
        ctx: &Context,
        paths: &[String],
        mount_point: &str,
        format: OutputFormat,
    ) -> Result<()> {
        let folders = list_secret_folders(&*ctx.catalog, paths, mount_point)
            .with_context(|| format!("Failed to list secrets under mount '{}'", mount_point))?;

        if folders.is_empty() {
            ctx.output.warning("No secret folders found");
        }

        ctx.output.document(&format.render(&folders)?);

        Ok(())
    }
}
