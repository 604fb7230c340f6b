//! Chain access
//!
//! The orchestration core only needs one capability from the chain:
//! submit a Move call signed by an identity and get back a digest or an
//! error. [`ChainClient`] is that seam.
//!
//! - [`SuiRpcClient`]: builds, signs and executes over Sui JSON-RPC
//! - [`DryRunClient`]: logs calls without touching the network

pub mod dry_run;
pub mod rpc;
pub mod tx;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use crate::wallet::SigningIdentity;

pub use dry_run::DryRunClient;
pub use rpc::SuiRpcClient;
pub use types::{CallArg, MoveCall, MoveTarget, ObjectId, SuiAddress, TxReceipt};

/// Submits signed transactions
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Sign `call` with `identity`, execute it and wait for the result
    async fn submit(&self, identity: &SigningIdentity, call: &MoveCall) -> Result<TxReceipt>;
}
