//! Wrap native SUI into wSUI

use tracing::{error, info};

use super::{ActionExecutor, DexContracts, TxOutcome, WrapAction, WRAPPER_MODULE};
use crate::chain::rpc::SUI_COIN_TYPE;
use crate::chain::{CallArg, MoveCall, MoveTarget, SuiAddress, TxReceipt};
use crate::error::{Error, Result};
use crate::wallet::SigningIdentity;

/// `wrap<SUI>(registry, coin split off gas, recipient)`
pub fn wrap_call(contracts: &DexContracts, action: &WrapAction, recipient: SuiAddress) -> MoveCall {
    MoveCall {
        target: MoveTarget::new(contracts.package, WRAPPER_MODULE, "wrap"),
        type_arguments: vec![SUI_COIN_TYPE.to_string()],
        arguments: vec![
            CallArg::SharedObject(contracts.shared_object),
            CallArg::SplitGas(action.amount),
            CallArg::Address(recipient),
        ],
    }
}

impl ActionExecutor {
    /// Wrap once
    ///
    /// Unlike the other actions a failure is returned as
    /// [`Error::WrapFailed`] so the caller can stop the wallet's pass.
    pub async fn wrap(&self, identity: &SigningIdentity, action: &WrapAction) -> Result<TxReceipt> {
        let address = identity.address();
        info!(step = true, "Wrapping wSUI for {}", address);

        let call = wrap_call(self.contracts(), action, address);
        match self.attempt(&action.label, identity, &call).await {
            TxOutcome::Success { digest } => {
                info!(success = true, "Wrapped wSUI for {}", address);
                Ok(TxReceipt { digest })
            }
            TxOutcome::Failure { message } => {
                error!("Skipping remaining actions for {} this cycle", address);
                Err(Error::WrapFailed {
                    address: address.to_string(),
                    reason: message,
                })
            }
        }
    }
}
