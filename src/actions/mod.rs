//! Action definitions and executors
//!
//! Every wallet runs the same [`OrchestrationPlan`]: an ordered list of
//! [`ActionConfig`] entries plus one delay applied between transactions.
//! [`ActionExecutor`] turns a single action into Move calls and submits them
//! through a [`ChainClient`].

pub mod liquidity;
pub mod swap;
pub mod wrap;

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::chain::{ChainClient, MoveCall, ObjectId};
use crate::error::{Error, Result};
use crate::wallet::SigningIdentity;

/// Dubhe module holding the wrapper entry points
pub const WRAPPER_MODULE: &str = "dubhe_wrapper_system";

/// Dubhe module holding the DEX entry points
pub const DEX_MODULE: &str = "dubhe_dex_system";

/// Wrap native SUI into wSUI
#[derive(Debug, Clone, Deserialize)]
pub struct WrapAction {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Amount in MIST split off the gas coin
    pub amount: u64,
    #[serde(default = "default_wrap_label")]
    pub label: String,
}

/// Exact-input swap along an asset path
#[derive(Debug, Clone, Deserialize)]
pub struct SwapAction {
    pub label: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub amount: u64,
    /// Fixed output floor handed to the DEX
    #[serde(default = "default_min_amount_out")]
    pub min_amount_out: u64,
    /// Number of identical submissions per pass
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Asset indices, first is the input asset, last the output asset
    pub path: Vec<u64>,
}

/// Deposit into a two-asset pool
#[derive(Debug, Clone, Deserialize)]
pub struct LiquidityAction {
    pub label: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub asset0: u64,
    pub asset1: u64,
    pub amount0: u64,
    pub amount1: u64,
    #[serde(default = "default_min_amount_out")]
    pub min0: u64,
    #[serde(default = "default_min_amount_out")]
    pub min1: u64,
}

fn default_true() -> bool {
    true
}

fn default_wrap_label() -> String {
    "Wrap wSUI".to_string()
}

fn default_min_amount_out() -> u64 {
    1
}

fn default_repeat() -> u32 {
    1
}

/// One configured step of the plan
#[derive(Debug, Clone)]
pub enum ActionConfig {
    Wrap(WrapAction),
    Swap(SwapAction),
    AddLiquidity(LiquidityAction),
}

impl ActionConfig {
    pub fn label(&self) -> &str {
        match self {
            ActionConfig::Wrap(a) => &a.label,
            ActionConfig::Swap(a) => &a.label,
            ActionConfig::AddLiquidity(a) => &a.label,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            ActionConfig::Wrap(a) => a.enabled,
            ActionConfig::Swap(a) => a.enabled,
            ActionConfig::AddLiquidity(a) => a.enabled,
        }
    }
}

/// Ordered actions every wallet executes
#[derive(Debug, Clone)]
pub struct OrchestrationPlan {
    actions: Vec<ActionConfig>,
    inter_action_delay: Duration,
}

impl OrchestrationPlan {
    /// Build a plan, rejecting swap paths with fewer than two assets
    pub fn new(actions: Vec<ActionConfig>, inter_action_delay: Duration) -> Result<Self> {
        for action in &actions {
            if let ActionConfig::Swap(swap) = action {
                if swap.path.len() < 2 {
                    return Err(Error::Config(format!(
                        "Swap '{}' needs a path of at least 2 assets, got {}",
                        swap.label,
                        swap.path.len()
                    )));
                }
            }
        }

        Ok(Self {
            actions,
            inter_action_delay,
        })
    }

    pub fn actions(&self) -> &[ActionConfig] {
        &self.actions
    }

    pub fn inter_action_delay(&self) -> Duration {
        self.inter_action_delay
    }

    /// Upper bound of submissions one wallet makes per pass
    pub fn submissions_per_wallet(&self) -> u64 {
        self.actions
            .iter()
            .filter(|a| a.enabled())
            .map(|a| match a {
                ActionConfig::Swap(swap) => swap.repeat as u64,
                _ => 1,
            })
            .sum()
    }
}

/// On-chain addresses the actions talk to
#[derive(Debug, Clone)]
pub struct DexContracts {
    pub package: ObjectId,
    /// Shared registry object passed to every call
    pub shared_object: ObjectId,
    pub explorer_url: String,
}

impl DexContracts {
    /// Explorer link for a transaction digest
    pub fn explorer_link(&self, digest: &str) -> String {
        format!("{}/txblock/{}", self.explorer_url, digest)
    }
}

/// Result of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    Success { digest: String },
    Failure { message: String },
}

impl TxOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TxOutcome::Success { .. })
    }
}

/// Sleep between transactions; a zero delay does not yield
pub async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Builds and submits the calls for each action kind
#[derive(Clone)]
pub struct ActionExecutor {
    client: Arc<dyn ChainClient>,
    contracts: DexContracts,
    delay: Duration,
}

impl ActionExecutor {
    pub fn new(client: Arc<dyn ChainClient>, contracts: DexContracts, delay: Duration) -> Self {
        Self {
            client,
            contracts,
            delay,
        }
    }

    pub fn contracts(&self) -> &DexContracts {
        &self.contracts
    }

    /// Submit one call and log the outcome; never fails past this point
    async fn attempt(&self, label: &str, identity: &SigningIdentity, call: &MoveCall) -> TxOutcome {
        match self.client.submit(identity, call).await {
            Ok(receipt) => {
                self.log_tx(label, identity, &receipt.digest);
                TxOutcome::Success {
                    digest: receipt.digest,
                }
            }
            Err(e) => {
                error!("{} failed for {}: {}", label, identity.address(), e);
                TxOutcome::Failure {
                    message: e.to_string(),
                }
            }
        }
    }

    fn log_tx(&self, label: &str, identity: &SigningIdentity, digest: &str) {
        info!(success = true, "{} for {}", label, identity.address());
        if digest.is_empty() {
            error!("Failed to retrieve transaction digest!");
        } else {
            info!(success = true, "Transaction: {}", self.contracts.explorer_link(digest));
        }
    }
}
