//! Per-wallet action sequencing

use std::sync::Arc;

use tracing::{info, warn};

use crate::actions::{pause, ActionConfig, ActionExecutor, OrchestrationPlan, TxOutcome};
use crate::wallet::SigningIdentity;

/// Tally of one wallet's pass through the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletReport {
    pub address: String,
    pub attempted: u32,
    pub succeeded: u32,
    pub failed: u32,
    /// Set when a wrap failure cut the pass short
    pub aborted: bool,
}

impl WalletReport {
    fn new(identity: &SigningIdentity) -> Self {
        Self {
            address: identity.address().to_string(),
            attempted: 0,
            succeeded: 0,
            failed: 0,
            aborted: false,
        }
    }

    fn record(&mut self, outcome: &TxOutcome) {
        self.attempted += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Runs the plan for one identity at a time
pub struct WalletSequencer {
    executor: ActionExecutor,
    plan: Arc<OrchestrationPlan>,
}

impl WalletSequencer {
    pub fn new(executor: ActionExecutor, plan: Arc<OrchestrationPlan>) -> Self {
        Self { executor, plan }
    }

    pub fn plan(&self) -> &OrchestrationPlan {
        &self.plan
    }

    /// Walk the plan in order for `identity`
    ///
    /// Only a wrap failure stops the pass; every other failure is logged and
    /// the next action runs.
    pub async fn run(&self, identity: &SigningIdentity) -> WalletReport {
        let delay = self.plan.inter_action_delay();
        let mut report = WalletReport::new(identity);

        info!("Processing wallet: {}", identity.address());

        for action in self.plan.actions() {
            match action {
                ActionConfig::Wrap(wrap) if wrap.enabled => {
                    let result = self.executor.wrap(identity, wrap).await;
                    match result {
                        Ok(receipt) => {
                            report.record(&TxOutcome::Success {
                                digest: receipt.digest,
                            });
                        }
                        Err(e) => {
                            report.record(&TxOutcome::Failure {
                                message: e.to_string(),
                            });
                            report.aborted = true;
                            warn!("{}", e);
                            return report;
                        }
                    }
                    pause(delay).await;
                }
                ActionConfig::Swap(swap) if swap.enabled && swap.repeat > 0 => {
                    for outcome in self.executor.swap(identity, swap).await {
                        report.record(&outcome);
                    }
                    pause(delay).await;
                }
                ActionConfig::AddLiquidity(add) if add.enabled => {
                    let outcome = self.executor.add_liquidity(identity, add).await;
                    report.record(&outcome);
                    pause(delay).await;
                }
                _ => {}
            }
        }

        info!(
            "Wallet {} done: {} attempted, {} succeeded, {} failed",
            report.address, report.attempted, report.succeeded, report.failed
        );

        report
    }
}
