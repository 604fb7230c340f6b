//! Exact-input token swaps

use tracing::info;

use super::{pause, ActionExecutor, DexContracts, SwapAction, TxOutcome, DEX_MODULE};
use crate::chain::{CallArg, MoveCall, MoveTarget, SuiAddress};
use crate::wallet::SigningIdentity;

/// `swap_exact_tokens_for_tokens(registry, amount_in, min_out, path, recipient)`
pub fn swap_call(contracts: &DexContracts, action: &SwapAction, recipient: SuiAddress) -> MoveCall {
    MoveCall {
        target: MoveTarget::new(contracts.package, DEX_MODULE, "swap_exact_tokens_for_tokens"),
        type_arguments: vec![],
        arguments: vec![
            CallArg::SharedObject(contracts.shared_object),
            CallArg::U256(action.amount as u128),
            CallArg::U256(action.min_amount_out as u128),
            CallArg::U256Vector(action.path.iter().map(|a| *a as u128).collect()),
            CallArg::Address(recipient),
        ],
    }
}

impl ActionExecutor {
    /// Run the swap `repeat` times
    ///
    /// Waits the inter-action delay between runs but not after the last.
    /// A failed run is logged and the next one still goes out.
    pub async fn swap(&self, identity: &SigningIdentity, action: &SwapAction) -> Vec<TxOutcome> {
        let address = identity.address();
        let call = swap_call(self.contracts(), action, address);
        let mut outcomes = Vec::new();

        for run in 1..=action.repeat {
            info!(
                step = true,
                "{} (Run {}/{}) for {}",
                action.label,
                run,
                action.repeat,
                address
            );

            let label = format!("{} (Run {})", action.label, run);
            let outcome = self.attempt(&label, identity, &call).await;
            if outcome.is_success() {
                info!(success = true, "{} completed for {}", label, address);
            }
            outcomes.push(outcome);

            if run < action.repeat {
                pause(self.delay).await;
            }
        }

        outcomes
    }
}
