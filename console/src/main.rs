use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use registry_console::{
    Registry,
    config::AppConfig,
    feedback::{ClearPolicy, StatusKind},
    terminal::{self, TerminalSurface},
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "registry-console", version, about = "Employee registry console")]
struct Cli {
    /// Base URL of the registry backend.
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
    /// Path of the employee collection under the base URL.
    #[arg(long, global = true, value_name = "PATH")]
    collection_path: Option<String>,
    /// How status message expiries interact.
    #[arg(long, global = true, value_enum)]
    status_clear: Option<ClearPolicy>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Default)]
enum Command {
    /// Interactive table view (default).
    #[default]
    Console,
    /// Load the collection once and print it.
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _obs = init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(collection_path) = cli.collection_path {
        config.collection_path = collection_path;
    }
    if let Some(policy) = cli.status_clear {
        config.clear_policy = policy;
    }

    let client = config.client()?;
    let mut registry = Registry::new(client, TerminalSurface::stdio(), config.banner());
    match cli.command.unwrap_or_default() {
        Command::Console => {
            terminal::run(&mut registry).await?;
            info!("console closed");
            Ok(())
        }
        Command::List => {
            registry.start().await;
            match registry.banner().current() {
                Some(status) if status.kind == StatusKind::Error => bail!(status.text),
                _ => Ok(()),
            }
        }
    }
}
