use crate::commands::OutputFormat;
use crate::context::Context;
use crate::manifest::Manifest;
use crate::resolver::{Mode, SecretReferenceResolver};
use anyhow::{Context as _, Result};
use indexmap::IndexMap;
use serde_yaml::Value;
use std::path::Path;

/// Handles the 'render' command - resolves secret references in a mapping file
pub struct RenderCommand;

impl RenderCommand {
    /// Execute the render command
    pub fn execute(
        ctx: &Context,
        input: &str,
        mode: Mode,
        format: OutputFormat,
        output: Option<&str>,
        manifest: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<()> {
        let contents = ctx.fs.read_input(input)?;
        let entries = Self::load_entries(&contents)
            .with_context(|| format!("Invalid input mapping: {}", input))?;

        let resolver = SecretReferenceResolver::new(ctx.stores.clone());
        let resolved = resolver
            .resolve(&entries, mode)
            .context("Failed to resolve secret references")?;
        let count = resolved.len();

        let rendered = match manifest {
            Some(name) => format.render(&Manifest::wrap(name, namespace, mode, resolved))?,
            None => format.render(&resolved)?,
        };

        match output {
            Some(path) => {
                let path = Path::new(path);
                if ctx.fs.exists(path) {
                    ctx.output
                        .warning(&format!("Overwriting existing file {}", path.display()));
                }
                ctx.fs.write(path, &rendered)?;
                ctx.output.success(&format!(
                    "Rendered {} {} entries to {}",
                    count,
                    mode,
                    path.display()
                ));
            }
            None => ctx.output.document(&rendered),
        }

        Ok(())
    }

    /// Parse a YAML (or JSON) document into an ordered name/value mapping.
    ///
    /// Numbers and booleans are kept in their textual form. Nulls, sequences
    /// and nested mappings are rejected.
    pub fn load_entries(contents: &str) -> Result<IndexMap<String, String>> {
        let document: Value =
            serde_yaml::from_str(contents).context("Failed to parse input as YAML or JSON")?;

        let mapping = match document {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(IndexMap::new()),
            _ => anyhow::bail!("Input must be a mapping of entry names to values"),
        };

        let mut entries = IndexMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = scalar_text(&key).context("Entry names must be strings, numbers or booleans")?;
            let text = scalar_text(&value).with_context(|| {
                format!("Entry '{}' must be a string, number or boolean", name)
            })?;
            entries.insert(name, text);
        }

        Ok(entries)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
