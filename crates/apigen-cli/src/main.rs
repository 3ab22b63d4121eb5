//! apigen CLI entrypoint
//! Parses command-line arguments and runs the generator for every configuration entry.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use apigen_core::{
    generate, BaseAction, Config, ConfigFile, GenerateReport, NamingPolicy, OutputLayout,
};
use clap::Parser;
use dialoguer::Confirm;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "apigen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a TypeScript client from a Swagger/OpenAPI document
    Generate {
        /// Batch config file (YAML, TOML or JSON) with a `configs` list
        #[arg(long, conflicts_with_all = ["swagger_url", "api_base", "out_path", "tpl_path"])]
        config: Option<PathBuf>,
        /// Path or URL of the Swagger/OpenAPI document
        ///
        /// Example: --swagger-url http://127.0.0.1:8088/api-json
        #[arg(long)]
        swagger_url: Option<String>,
        /// Base URL prepended to every generated request
        #[arg(long)]
        api_base: Option<String>,
        /// Output directory for generated code
        #[arg(long)]
        out_path: Option<String>,
        /// Custom template directory
        #[arg(long)]
        tpl_path: Option<String>,
        /// Regenerate an existing base without asking
        #[arg(long, short = 'y', conflicts_with = "keep_base")]
        yes: bool,
        /// Keep an existing base without asking
        #[arg(long)]
        keep_base: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; `log` records from the core are forwarded too
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            config,
            swagger_url,
            api_base,
            out_path,
            tpl_path,
            yes,
            keep_base,
        } => {
            let entries = match config {
                Some(path) => ConfigFile::from_file(&path)
                    .await
                    .with_context(|| format!("Failed to load config file {}", path.display()))?
                    .configs,
                None => vec![Config {
                    swagger_url: swagger_url.unwrap_or_default(),
                    api_base: api_base.unwrap_or_default(),
                    out_path: out_path.unwrap_or_default(),
                    tpl_path,
                }],
            };
            if entries.is_empty() {
                anyhow::bail!("No configuration entries to generate");
            }

            let naming = NamingPolicy::default();
            let mut failed = 0;
            for (index, entry) in entries.iter().enumerate() {
                match run_entry(entry, &naming, yes, keep_base).await {
                    Ok(report) => tracing::info!(
                        "Generated {} controllers, {} models and {} enums into {}",
                        report.controllers,
                        report.models,
                        report.enums,
                        report.out_dir.display()
                    ),
                    Err(e) => {
                        failed += 1;
                        tracing::error!("Entry {} ({}) failed: {:#}", index + 1, entry.swagger_url, e);
                    }
                }
            }

            if failed > 0 {
                anyhow::bail!("{} of {} entries failed", failed, entries.len());
            }
        }
    }

    Ok(())
}

async fn run_entry(
    entry: &Config,
    naming: &NamingPolicy,
    yes: bool,
    keep_base: bool,
) -> anyhow::Result<GenerateReport> {
    entry.validate().context("Invalid configuration")?;

    let layout = OutputLayout::new(entry.out_dir());
    let action = choose_base_action(layout.base_exists(), yes, keep_base, || {
        Confirm::new()
            .with_prompt(format!(
                "{} already has a base directory. Regenerate it?",
                layout.root().display()
            ))
            .default(false)
            .interact()
            .context("Failed to read answer")
    })?;
    tracing::debug!("Base action for {}: {:?}", entry.out_path, action);

    generate(entry, naming, action)
        .await
        .with_context(|| format!("Failed to generate from {}", entry.swagger_url))
}

/// Flags win over the prompt; the prompt only runs when a base already exists
fn choose_base_action<F>(
    base_exists: bool,
    yes: bool,
    keep_base: bool,
    ask: F,
) -> anyhow::Result<BaseAction>
where
    F: FnOnce() -> anyhow::Result<bool>,
{
    if !base_exists {
        return Ok(BaseAction::Fresh);
    }
    if yes {
        return Ok(BaseAction::Regenerate);
    }
    if keep_base {
        return Ok(BaseAction::Keep);
    }
    Ok(if ask()? {
        BaseAction::Regenerate
    } else {
        BaseAction::Keep
    })
}
