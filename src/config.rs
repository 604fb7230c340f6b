//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::actions::{
    ActionConfig, DexContracts, LiquidityAction, OrchestrationPlan, SwapAction, WrapAction,
};
use crate::chain::ObjectId;

/// Asset indices in the Dubhe asset registry
pub mod assets {
    pub const WSUI: u64 = 0;
    pub const WDUBHE: u64 = 1;
    pub const WSTARS: u64 = 3;
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub contracts: ContractsConfig,
    #[serde(default)]
    pub plan: PlanConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    #[serde(default = "default_rpc_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Gas budget per transaction in MIST
    #[serde(default = "default_gas_budget")]
    pub gas_budget: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractsConfig {
    /// Dubhe package id
    #[serde(default = "default_package")]
    pub package: String,
    /// Shared DEX registry object
    #[serde(default = "default_shared_object")]
    pub shared_object: String,
    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,
}

/// Actions every wallet runs, in order: wrap, swaps, liquidity
#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_between_tx_ms: u64,
    #[serde(default = "default_wrap")]
    pub wrap: WrapAction,
    #[serde(default = "default_swaps")]
    pub swaps: Vec<SwapAction>,
    #[serde(default = "default_liquidity")]
    pub liquidity: Vec<LiquidityAction>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: default_rpc_endpoint(),
            timeout_ms: default_timeout_ms(),
            gas_budget: default_gas_budget(),
        }
    }
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            package: default_package(),
            shared_object: default_shared_object(),
            explorer_url: default_explorer_url(),
        }
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            delay_between_tx_ms: default_delay_ms(),
            wrap: default_wrap(),
            swaps: default_swaps(),
            liquidity: default_liquidity(),
        }
    }
}

fn default_rpc_endpoint() -> String {
    "https://fullnode.testnet.sui.io:443".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_gas_budget() -> u64 {
    50_000_000
}

fn default_package() -> String {
    "0xa6477a6bf50e2389383b34a76d59ccfbec766ff2decefe38e1d8436ef8a9b245".to_string()
}

fn default_shared_object() -> String {
    "0x8ece4cb6de126eb5c7a375f90c221bdc16c81ad8f6f894af08e0b6c25fb50a45".to_string()
}

fn default_explorer_url() -> String {
    "https://testnet.suivision.xyz".to_string()
}

fn default_delay_ms() -> u64 {
    5_000
}

fn default_wrap() -> WrapAction {
    WrapAction {
        enabled: true,
        amount: 100_000_000,
        label: "Wrap wSUI".to_string(),
    }
}

fn default_swaps() -> Vec<SwapAction> {
    use assets::*;

    let swap = |label: &str, from: u64, to: u64| SwapAction {
        enabled: true,
        amount: 100_000,
        min_amount_out: 1,
        repeat: 1,
        path: vec![from, to],
        label: label.to_string(),
    };

    vec![
        swap("Swap wSUI -> wDUBHE", WSUI, WDUBHE),
        swap("Swap wDUBHE -> wSUI", WDUBHE, WSUI),
        swap("Swap wSUI -> wSTARS", WSUI, WSTARS),
        swap("Swap wSTARS -> wSUI", WSTARS, WSUI),
    ]
}

fn default_liquidity() -> Vec<LiquidityAction> {
    use assets::*;

    let add = |label: &str, asset0: u64, asset1: u64, amount0: u64, amount1: u64| {
        LiquidityAction {
            enabled: true,
            asset0,
            asset1,
            amount0,
            amount1,
            min0: 1,
            min1: 1,
            label: label.to_string(),
        }
    };

    vec![
        add("Add Liquidity wSUI-wSTARS", WSUI, WSTARS, 1_000_000, 19_149),
        add("Add Liquidity wSUI-wDUBHE", WSUI, WDUBHE, 1_000_000, 5_765),
        add("Add Liquidity wDUBHE-wSTARS", WDUBHE, WSTARS, 2_000, 13_873),
    ]
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Start with defaults
            .set_default("rpc.endpoint", default_rpc_endpoint())?
            .set_default("rpc.timeout_ms", default_timeout_ms() as i64)?
            .set_default("plan.delay_between_tx_ms", default_delay_ms() as i64)?
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix CYCLER__)
            .add_source(
                config::Environment::with_prefix("CYCLER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.rpc.endpoint)
            .with_context(|| format!("Invalid RPC endpoint: {}", self.rpc.endpoint))?;

        if self.rpc.timeout_ms == 0 {
            anyhow::bail!("rpc.timeout_ms must be positive");
        }

        if self.rpc.gas_budget == 0 {
            anyhow::bail!("rpc.gas_budget must be positive");
        }

        self.dex_contracts()?;
        self.plan()?;

        if self.plan.delay_between_tx_ms == 0 {
            tracing::warn!(
                "delay_between_tx_ms is 0 - transactions will be sent back to back and may hit rate limits"
            );
        }

        Ok(())
    }

    /// Contract addresses used by every action
    pub fn dex_contracts(&self) -> Result<DexContracts> {
        let package: ObjectId = self
            .contracts
            .package
            .parse()
            .with_context(|| format!("Invalid package id: {}", self.contracts.package))?;
        let shared_object: ObjectId = self
            .contracts
            .shared_object
            .parse()
            .with_context(|| format!("Invalid shared object id: {}", self.contracts.shared_object))?;

        url::Url::parse(&self.contracts.explorer_url)
            .with_context(|| format!("Invalid explorer url: {}", self.contracts.explorer_url))?;

        Ok(DexContracts {
            package,
            shared_object,
            explorer_url: self.contracts.explorer_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the immutable orchestration plan
    pub fn plan(&self) -> Result<OrchestrationPlan> {
        let mut actions = Vec::with_capacity(1 + self.plan.swaps.len() + self.plan.liquidity.len());
        actions.push(ActionConfig::Wrap(self.plan.wrap.clone()));
        actions.extend(self.plan.swaps.iter().cloned().map(ActionConfig::Swap));
        actions.extend(self.plan.liquidity.iter().cloned().map(ActionConfig::AddLiquidity));

        Ok(OrchestrationPlan::new(
            actions,
            Duration::from_millis(self.plan.delay_between_tx_ms),
        )?)
    }

    /// Get masked configuration for display (hide secrets)
    pub fn masked_display(&self) -> String {
        let mut out = format!(
            r#"Configuration:
  RPC:
    endpoint: {}
    timeout: {}ms
    gas_budget: {} MIST
  Contracts:
    package: {}
    shared_object: {}
    explorer: {}
  Plan:
    delay_between_tx: {}ms
    wrap: {} (enabled: {}, amount: {})
"#,
            mask_url(&self.rpc.endpoint),
            self.rpc.timeout_ms,
            self.rpc.gas_budget,
            self.contracts.package,
            self.contracts.shared_object,
            self.contracts.explorer_url,
            self.plan.delay_between_tx_ms,
            self.plan.wrap.label,
            self.plan.wrap.enabled,
            self.plan.wrap.amount,
        );

        for swap in &self.plan.swaps {
            out.push_str(&format!(
                "    swap: {} (enabled: {}, amount: {}, min_out: {}, repeat: {}, path: {:?})\n",
                swap.label, swap.enabled, swap.amount, swap.min_amount_out, swap.repeat, swap.path
            ));
        }

        for add in &self.plan.liquidity {
            out.push_str(&format!(
                "    liquidity: {} (enabled: {}, assets: {}/{}, amounts: {}/{}, min: {}/{})\n",
                add.label,
                add.enabled,
                add.asset0,
                add.asset1,
                add.amount0,
                add.amount1,
                add.min0,
                add.min1
            ));
        }

        out
    }
}

/// Mask URL for display (hide API keys in query params)
fn mask_url(url: &str) -> String {
    if let Some(idx) = url.find('?') {
        format!("{}?***", &url[..idx])
    } else {
        url.to_string()
    }
}
