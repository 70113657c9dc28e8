use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cryptobuddy_agents::CryptoBuddy;
use cryptobuddy_cli::run_chat;
use cryptobuddy_core::Catalog;
use cryptobuddy_observability::{init_tracing, BuddyMetrics};
use tokio::io::BufReader;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "cryptobuddy")]
#[command(about = "Rule-based cryptocurrency advisor")]
struct Cli {
    /// JSON catalog file replacing the built-in asset list.
    #[arg(long, env = "CRYPTOBUDDY_CATALOG")]
    catalog: Option<PathBuf>,

    /// Seed for greeting, farewell and recommendation picks.
    #[arg(long, env = "CRYPTOBUDDY_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive session (default).
    Chat,
    /// Answer a single query and exit.
    Ask { query: Vec<String> },
    /// Print the loaded catalog as JSON.
    Catalog,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("cryptobuddy_cli", "warn");
    let cli = Cli::parse();

    let catalog = Arc::new(load_catalog(cli.catalog.as_ref())?);
    let metrics = BuddyMetrics::shared();
    let mut buddy = CryptoBuddy::with_seed(catalog.clone(), cli.seed, metrics.clone());

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            let interrupt = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            run_chat(
                &mut buddy,
                BufReader::new(tokio::io::stdin()),
                &mut io::stdout(),
                interrupt,
            )
            .await?
        }
        Command::Ask { query } => {
            let reply = buddy.handle(&query.join(" "));
            println!("{}", reply.text);
        }
        Command::Catalog => {
            println!("{}", serde_json::to_string_pretty(catalog.entries())?);
        }
    }

    info!(
        metrics = %serde_json::to_string(&metrics.snapshot())?,
        "session finished"
    );
    Ok(())
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("failed loading catalog from {}", path.display())),
        None => Ok(Catalog::reference()),
    }
}
