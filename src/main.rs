//! Daily Swap CLI
//!
//! Runs the swap loop with no arguments; every flag is optional.

use clap::Parser;
use daily_swap::{banner, wallet, Config, DailyRunner, Result, RpcChainClient, SwapExecutor};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "daily-swap")]
#[command(about = "Automated daily token swaps for a list of wallets")]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Private key file (one key per line)
    #[arg(short, long)]
    keys: Option<PathBuf>,

    /// Run a single cycle and exit instead of looping forever
    #[arg(long)]
    once: bool,

    /// Simulate approvals and swaps with eth_call instead of broadcasting.
    /// A swap that needs a fresh approval is skipped, since the simulated
    /// approval leaves the allowance unchanged.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .apply_env()?;
    if let Some(keys) = cli.keys {
        config.keys_file = keys;
    }
    config.validate()?;

    for line in banner::banner(
        "Auto Daily Swap",
        &format!("chain {} via {}", config.rpc.chain_id, config.rpc.url),
    ) {
        println!("{}", line);
    }

    let wallets = wallet::load_wallets(&config.keys_file)?;

    let client = RpcChainClient::connect(&config.rpc)?.with_dry_run(cli.dry_run);
    if let Err(e) = client.verify_chain_id().await {
        tracing::warn!(error = %e, "Could not confirm chain id, continuing");
    }

    tracing::info!(
        router = %config.swap.router,
        tokens = config.swap.tokens.len(),
        dry_run = cli.dry_run,
        "Starting swap bot"
    );

    let executor = SwapExecutor::new(client, config.swap.clone());
    let mut runner = DailyRunner::new(executor, wallets, config.schedule.clone())
        .with_keys_file(config.keys_file.clone());
    if cli.once {
        runner = runner.with_max_cycles(1);
    }

    runner.run().await;
    Ok(())
}
