//! Dry-run chain client
//!
//! Encodes every call exactly like the live client would, but returns the
//! would-be digest instead of executing anything.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;

use super::tx::{encode_move_call, transaction_digest, GasCoinRef, GasParams};
use super::types::{CallArg, MoveCall, ObjectId, TxReceipt};
use super::ChainClient;
use crate::error::Result;
use crate::wallet::SigningIdentity;

const DRY_RUN_GAS_PRICE: u64 = 1_000;
const DRY_RUN_GAS_BUDGET: u64 = 50_000_000;

/// Chain client that never touches the network
#[derive(Debug, Default)]
pub struct DryRunClient {
    submitted: AtomicU64,
}

impl DryRunClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls seen so far
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainClient for DryRunClient {
    async fn submit(&self, identity: &SigningIdentity, call: &MoveCall) -> Result<TxReceipt> {
        let sequence = self.submitted.fetch_add(1, Ordering::SeqCst);
        let sender = identity.address();

        let shared_versions: HashMap<ObjectId, u64> = call
            .arguments
            .iter()
            .filter_map(|arg| match arg {
                CallArg::SharedObject(id) => Some((*id, 1)),
                _ => None,
            })
            .collect();

        // The sequence number stands in for the gas coin version so each
        // submission gets a distinct digest.
        let gas = GasParams {
            owner: sender,
            payment: vec![GasCoinRef {
                object_id: ObjectId([0u8; 32]),
                version: sequence,
                digest: [0u8; 32],
            }],
            price: DRY_RUN_GAS_PRICE,
            budget: DRY_RUN_GAS_BUDGET,
        };

        let tx_bytes = encode_move_call(call, sender, &shared_versions, &gas)?;
        let digest = transaction_digest(&tx_bytes);

        info!(
            "DRY-RUN: would call {} with {} argument(s) ({} bytes) from {}",
            call.target,
            call.arguments.len(),
            tx_bytes.len(),
            sender
        );

        Ok(TxReceipt { digest })
    }
}
