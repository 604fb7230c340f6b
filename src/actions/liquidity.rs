//! Two-asset liquidity deposits

use tracing::info;

use super::{ActionExecutor, DexContracts, LiquidityAction, TxOutcome, DEX_MODULE};
use crate::chain::{CallArg, MoveCall, MoveTarget, SuiAddress};
use crate::wallet::SigningIdentity;

/// `add_liquidity(registry, asset0, asset1, amount0, amount1, min0, min1, recipient)`
pub fn add_liquidity_call(
    contracts: &DexContracts,
    action: &LiquidityAction,
    recipient: SuiAddress,
) -> MoveCall {
    MoveCall {
        target: MoveTarget::new(contracts.package, DEX_MODULE, "add_liquidity"),
        type_arguments: vec![],
        arguments: vec![
            CallArg::SharedObject(contracts.shared_object),
            CallArg::U256(action.asset0 as u128),
            CallArg::U256(action.asset1 as u128),
            CallArg::U256(action.amount0 as u128),
            CallArg::U256(action.amount1 as u128),
            CallArg::U256(action.min0 as u128),
            CallArg::U256(action.min1 as u128),
            CallArg::Address(recipient),
        ],
    }
}

impl ActionExecutor {
    /// Add liquidity once; failures are logged and returned as an outcome
    pub async fn add_liquidity(
        &self,
        identity: &SigningIdentity,
        action: &LiquidityAction,
    ) -> TxOutcome {
        let address = identity.address();
        info!(step = true, "{} for {}", action.label, address);

        let call = add_liquidity_call(self.contracts(), action, address);
        let outcome = self.attempt(&action.label, identity, &call).await;
        if outcome.is_success() {
            info!(success = true, "{} completed for {}", action.label, address);
        }
        outcome
    }
}
