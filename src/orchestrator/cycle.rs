//! Outer cycle loop over all wallets

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{error, info};

use super::input::CycleSource;
use super::sequencer::{WalletReport, WalletSequencer};
use crate::actions::pause;
use crate::error::Result;
use crate::wallet::SigningIdentity;

/// Runs the sequencer over every identity, cycle after cycle
pub struct CycleOrchestrator {
    identities: Vec<SigningIdentity>,
    sequencer: WalletSequencer,
}

impl CycleOrchestrator {
    pub fn new(identities: Vec<SigningIdentity>, sequencer: WalletSequencer) -> Self {
        Self {
            identities,
            sequencer,
        }
    }

    pub fn identities(&self) -> &[SigningIdentity] {
        &self.identities
    }

    /// Keep asking `source` for cycle counts and running them
    ///
    /// Returns once the source has nothing more; an interactive source only
    /// does that when its input closes.
    pub async fn run(&self, source: &mut dyn CycleSource) -> Result<()> {
        while let Some(count) = source.next_cycle_count().await? {
            self.run_cycles(count).await;
            info!("All {} transaction cycles completed", count);
        }
        Ok(())
    }

    /// Run `count` full passes over all identities, in load order
    pub async fn run_cycles(&self, count: u32) -> Vec<WalletReport> {
        let delay = self.sequencer.plan().inter_action_delay();
        let mut reports = Vec::with_capacity(count as usize * self.identities.len());

        for cycle in 1..=count {
            info!("Starting transaction cycle {}/{}", cycle, count);

            for identity in &self.identities {
                let run = AssertUnwindSafe(self.sequencer.run(identity)).catch_unwind();
                match run.await {
                    Ok(report) => reports.push(report),
                    Err(panic) => {
                        error!(
                            "Error processing wallet {}: {}",
                            identity.address(),
                            panic_message(panic.as_ref())
                        );
                    }
                }
                pause(delay).await;
            }
        }

        reports
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
