//! Dubhe Cycler - multi-wallet wrap/swap/liquidity routine for Sui testnet
//!
//! # WARNING
//! - Every cycle sends real transactions and spends gas from each wallet.
//! - Swaps use a fixed minimum output and have no slippage protection.
//!   Testnet only.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

// Use the library crate
use dubhe_cycler::cli::commands;
use dubhe_cycler::config::Config;
use dubhe_cycler::orchestrator::input::{MAX_CYCLES, MIN_CYCLES};

/// Dubhe Cycler - repeats wrap, swap and add-liquidity for every wallet
#[derive(Parser)]
#[command(name = "cycler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cycles over all wallets (prompts for a count unless --cycles is given)
    ///
    /// Live runs ask for confirmation on the terminal first. Pass --yes when
    /// stdin is piped or the run is unattended.
    Run {
        /// Cycle counts to run unattended, then exit (repeatable)
        #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_CYCLES as i64..=MAX_CYCLES as i64))]
        cycles: Vec<u32>,

        /// Encode and log transactions without submitting them
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt (required when stdin is not a terminal)
        #[arg(long)]
        yes: bool,
    },

    /// List wallets loaded from PRIVATE_KEY_* and MNEMONIC_* variables
    Wallets,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dubhe_cycler=info".parse()?),
        )
        .with_target(false)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Run {
            cycles,
            dry_run,
            yes,
        } => commands::run(&config, cycles, dry_run, yes).await,
        Commands::Wallets => commands::wallets(),
        Commands::Config => commands::show_config(&config),
    };

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
