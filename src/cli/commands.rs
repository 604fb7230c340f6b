//! CLI command implementations

use anyhow::Result;
use dialoguer::Confirm;
use std::io::IsTerminal;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};

use crate::actions::ActionExecutor;
use crate::chain::{ChainClient, DryRunClient, SuiRpcClient};
use crate::config::Config;
use crate::orchestrator::{
    CycleOrchestrator, CycleSource, FixedCycles, PromptCycleSource, WalletSequencer,
};
use crate::wallet::CredentialLoader;

/// Run the cycler
///
/// With no `cycles` the operator is prompted for a count before every batch
/// and the loop only ends when stdin closes.
pub async fn run(config: &Config, cycles: Vec<u32>, dry_run: bool, yes: bool) -> Result<()> {
    // Credentials first: nothing else happens without a wallet
    let identities = CredentialLoader::from_env().load()?;

    let plan = Arc::new(config.plan()?);
    let contracts = config.dex_contracts()?;

    if dry_run {
        warn!("Running in DRY-RUN mode - no transactions will be submitted");
    }

    info!(
        "Plan: {} action(s), up to {} transaction(s) per wallet per cycle, {}ms between transactions",
        plan.actions().len(),
        plan.submissions_per_wallet(),
        plan.inter_action_delay().as_millis()
    );

    let client: Arc<dyn ChainClient> = if dry_run {
        Arc::new(DryRunClient::new())
    } else {
        info!("Connecting to {}", config.rpc.endpoint);
        Arc::new(SuiRpcClient::new(&config.rpc)?)
    };

    // Confirmation prompt (unless --yes)
    if !dry_run && !yes {
        if !std::io::stdin().is_terminal() {
            anyhow::bail!(
                "stdin is not a terminal, cannot confirm live transactions; pass --yes to run unattended"
            );
        }

        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Send live transactions from {} wallet(s) via {}?",
                identities.len(),
                config.rpc.endpoint
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            info!("Run cancelled by user");
            return Ok(());
        }
    }

    let executor = ActionExecutor::new(client, contracts, plan.inter_action_delay());
    let orchestrator = CycleOrchestrator::new(identities, WalletSequencer::new(executor, plan));
    info!(
        "Cycling {} wallet(s) in load order",
        orchestrator.identities().len()
    );

    let mut source: Box<dyn CycleSource> = if cycles.is_empty() {
        Box::new(PromptCycleSource::new(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        ))
    } else {
        Box::new(FixedCycles::new(cycles)?)
    };

    orchestrator.run(source.as_mut()).await?;

    info!("Cycler finished");
    Ok(())
}

/// List the wallets that would be used
pub fn wallets() -> Result<()> {
    let identities = CredentialLoader::from_env().load()?;

    println!("\n=== WALLETS ===\n");
    for (i, identity) in identities.iter().enumerate() {
        println!("  {:>3}. {} ({})", i + 1, identity.address(), identity.label());
    }
    println!();

    Ok(())
}

/// Show current configuration
pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.masked_display());
    Ok(())
}
