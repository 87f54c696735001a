use anyhow::{Context, Result};
use serde::Serialize;

/// Serialization format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl OutputFormat {
    /// Serialize `value`, always ending with a newline
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Yaml => {
                serde_yaml::to_string(value).context("Failed to serialize output as YAML")
            }
            OutputFormat::Json => serde_json::to_string_pretty(value)
                .map(|json| json + "\n")
                .context("Failed to serialize output as JSON"),
        }
    }
}
