//! Scripted chain client for orchestration tests.
//!
//! Records every submission in order with the (paused) tokio clock, and
//! fails or panics on demand so every branch of the sequencer can be hit
//! without a network.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use dubhe_cycler::actions::{
    ActionConfig, ActionExecutor, DexContracts, LiquidityAction, OrchestrationPlan, SwapAction,
    WrapAction,
};
use dubhe_cycler::chain::{ChainClient, MoveCall, ObjectId, TxReceipt};
use dubhe_cycler::orchestrator::WalletSequencer;
use dubhe_cycler::wallet::SigningIdentity;
use dubhe_cycler::{Error, Result};

/// One recorded submission
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub wallet: String,
    pub function: String,
    pub at: Instant,
}

type FailRule = Box<dyn Fn(&RecordedCall, usize) -> bool + Send + Sync>;

/// In-memory client with scripted failures
pub struct ScriptedClient {
    calls: Mutex<Vec<RecordedCall>>,
    fail_when: FailRule,
    panic_for_wallet: Option<String>,
}

impl ScriptedClient {
    /// Every submission succeeds
    pub fn ok() -> Arc<Self> {
        Self::failing(|_, _| false)
    }

    /// Fail when `rule(call, index_of_call_overall)` is true
    pub fn failing<F>(rule: F) -> Arc<Self>
    where
        F: Fn(&RecordedCall, usize) -> bool + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_when: Box::new(rule),
            panic_for_wallet: None,
        })
    }

    /// Panic on any submission from `wallet`
    pub fn panicking_for(wallet: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_when: Box::new(|_, _| false),
            panic_for_wallet: Some(wallet.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn functions(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.function).collect()
    }

    pub fn functions_for(&self, wallet: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.wallet == wallet)
            .map(|c| c.function)
            .collect()
    }

    pub fn wallets(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.wallet).collect()
    }
}

#[async_trait]
impl ChainClient for ScriptedClient {
    async fn submit(&self, identity: &SigningIdentity, call: &MoveCall) -> Result<TxReceipt> {
        if self.panic_for_wallet.as_deref() == Some(identity.label()) {
            panic!("scripted panic for {}", identity.label());
        }

        let record = RecordedCall {
            wallet: identity.label().to_string(),
            function: call.target.function.clone(),
            at: Instant::now(),
        };

        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(record.clone());
            calls.len() - 1
        };

        if (self.fail_when)(&record, index) {
            return Err(Error::TransactionSend(format!(
                "scripted failure #{} for {}",
                index, record.function
            )));
        }

        Ok(TxReceipt {
            digest: format!("digest-{}", index),
        })
    }
}

pub const WRAP: &str = "wrap";
pub const SWAP: &str = "swap_exact_tokens_for_tokens";
pub const ADD_LIQUIDITY: &str = "add_liquidity";

pub fn identity(n: u8) -> SigningIdentity {
    SigningIdentity::from_secret(format!("PRIVATE_KEY_{}", n), [n; 32])
}

pub fn contracts() -> DexContracts {
    DexContracts {
        package: ObjectId([1u8; 32]),
        shared_object: ObjectId([2u8; 32]),
        explorer_url: "https://testnet.suivision.xyz".to_string(),
    }
}

pub fn wrap(enabled: bool) -> ActionConfig {
    ActionConfig::Wrap(WrapAction {
        enabled,
        amount: 100_000_000,
        label: "Wrap wSUI".to_string(),
    })
}

pub fn swap_action(label: &str, enabled: bool, repeat: u32, path: Vec<u64>) -> SwapAction {
    SwapAction {
        label: label.to_string(),
        enabled,
        amount: 100_000,
        min_amount_out: 1,
        repeat,
        path,
    }
}

pub fn swap(label: &str, enabled: bool, repeat: u32) -> ActionConfig {
    ActionConfig::Swap(swap_action(label, enabled, repeat, vec![0, 1]))
}

pub fn liquidity(label: &str, enabled: bool) -> ActionConfig {
    ActionConfig::AddLiquidity(LiquidityAction {
        label: label.to_string(),
        enabled,
        asset0: 0,
        asset1: 1,
        amount0: 1_000_000,
        amount1: 5_765,
        min0: 1,
        min1: 1,
    })
}

/// Wrap, four swaps and three liquidity adds, each switch given explicitly
pub fn full_plan(wrap_on: bool, swaps_on: bool, swap_repeat: u32, liquidity_on: [bool; 3]) -> Vec<ActionConfig> {
    vec![
        wrap(wrap_on),
        swap("Swap wSUI -> wDUBHE", swaps_on, swap_repeat),
        swap("Swap wDUBHE -> wSUI", swaps_on, swap_repeat),
        swap("Swap wSUI -> wSTARS", swaps_on, swap_repeat),
        swap("Swap wSTARS -> wSUI", swaps_on, swap_repeat),
        liquidity("Add Liquidity wSUI-wSTARS", liquidity_on[0]),
        liquidity("Add Liquidity wSUI-wDUBHE", liquidity_on[1]),
        liquidity("Add Liquidity wDUBHE-wSTARS", liquidity_on[2]),
    ]
}

pub fn executor(client: Arc<dyn ChainClient>, delay: Duration) -> ActionExecutor {
    ActionExecutor::new(client, contracts(), delay)
}

pub fn sequencer(client: Arc<dyn ChainClient>, actions: Vec<ActionConfig>, delay: Duration) -> WalletSequencer {
    let plan = Arc::new(OrchestrationPlan::new(actions, delay).unwrap());
    WalletSequencer::new(executor(client, delay), plan)
}

/// In-memory log sink for asserting on emitted events
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    /// Plain-text fmt subscriber writing into this buffer
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let sink = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish()
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}
