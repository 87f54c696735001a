mod commands;
mod config;
mod context;
mod lookup;
mod manifest;
mod output;
mod resolver;
mod secrets;
mod traits;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ListCommand, OutputFormat, RenderCommand, VersionsCommand};
use config::StoreConfig;
use context::Context;
use resolver::Mode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vaultfill")]
#[command(about = "Resolve Vault and AWS Secrets Manager references in configuration mappings", long_about = None)]
#[command(version)]
struct Cli {
    /// Vault server address
    #[arg(long, global = true, env = "VAULT_ADDR")]
    vault_addr: Option<String>,

    /// Vault token (falls back to ~/.vault-token)
    #[arg(long, global = true, env = "VAULT_TOKEN", hide_env_values = true)]
    vault_token: Option<String>,

    /// Vault namespace sent with every request
    #[arg(long, global = true, env = "VAULT_NAMESPACE")]
    vault_namespace: Option<String>,

    /// AWS region for Secrets Manager references
    #[arg(long, global = true, env = "AWS_REGION")]
    aws_region: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve secret references in a YAML or JSON mapping
    Render {
        /// Mapping file to resolve, or '-' for stdin
        input: String,

        /// Emit values as-is (config) or base64-encoded (secret)
        #[arg(short, long, value_enum)]
        mode: Mode,

        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Wrap the result in a ConfigMap or Secret manifest with this name
        #[arg(long)]
        manifest: Option<String>,

        /// Namespace for the manifest
        #[arg(long, requires = "manifest")]
        namespace: Option<String>,
    },

    /// List secret folders under one or more Vault KV v2 paths
    List {
        /// Paths to list
        #[arg(required = true)]
        paths: Vec<String>,

        /// KV v2 mount point
        #[arg(long)]
        mount_point: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },

    /// Print the current version of every secret under Vault KV v2 paths
    Versions {
        /// Paths whose children are versioned
        #[arg(required = true)]
        paths: Vec<String>,

        /// KV v2 mount point
        #[arg(long)]
        mount_point: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("vaultfill=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = StoreConfig::new(
        cli.vault_addr,
        cli.vault_token,
        cli.vault_namespace,
        cli.aws_region,
    );
    let ctx = Context::new(&config)?;

    match cli.command {
        Commands::Render {
            input,
            mode,
            format,
            output,
            manifest,
            namespace,
        } => {
            RenderCommand::execute(
                &ctx,
                &input,
                mode,
                format,
                output.as_deref(),
                manifest.as_deref(),
                namespace.as_deref(),
            )?;
        }
        Commands::List {
            paths,
            mount_point,
            format,
        } => {
            ListCommand::execute(&ctx, &paths, &mount_point, format)?;
        }
        Commands::Versions { paths, mount_point } => {
            VersionsCommand::execute(&ctx, &paths, &mount_point)?;
        }
    }

    Ok(())
}
