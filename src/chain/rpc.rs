//! Sui JSON-RPC client
//!
//! Resolves everything a Move call transaction needs (shared object
//! versions, gas price, a gas coin), encodes it with [`super::tx`], signs it
//! with the identity and executes it with `WaitForLocalExecution`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use dashmap::DashMap;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::tx::{encode_move_call, GasCoinRef, GasParams};
use super::types::{CallArg, MoveCall, ObjectId, SuiAddress, TxReceipt};
use super::ChainClient;
use crate::config::RpcConfig;
use crate::error::{Error, Result};
use crate::wallet::SigningIdentity;

/// Coin type used to pay for gas
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Max coins requested per `suix_getCoins` page
const COIN_PAGE_SIZE: u32 = 50;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Entry of `suix_getCoins`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinInfo {
    pub coin_object_id: String,
    pub version: Value,
    pub digest: String,
    pub balance: Value,
}

#[derive(Debug, Deserialize)]
struct CoinPage {
    data: Vec<CoinInfo>,
}

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    digest: Option<String>,
    effects: Option<Effects>,
}

#[derive(Debug, Deserialize)]
struct Effects {
    status: EffectsStatus,
}

#[derive(Debug, Deserialize)]
struct EffectsStatus {
    status: String,
    error: Option<String>,
}

/// Numbers come back either as JSON numbers or as decimal strings
fn json_u64(value: &Value, what: &str) -> Result<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::Deserialization(format!("Invalid {}: {}", what, value)))
}

/// Pick the coin with the largest balance as gas payment
pub fn select_gas_coin(coins: &[CoinInfo]) -> Result<GasCoinRef> {
    let mut best: Option<(u64, &CoinInfo)> = None;
    for coin in coins {
        let balance = json_u64(&coin.balance, "coin balance")?;
        if best.map_or(true, |(b, _)| balance > b) {
            best = Some((balance, coin));
        }
    }

    let (_, coin) =
        best.ok_or_else(|| Error::TransactionBuild("No SUI coins to pay for gas".to_string()))?;

    let digest_bytes = bs58::decode(&coin.digest)
        .into_vec()
        .map_err(|e| Error::Deserialization(format!("Invalid coin digest: {}", e)))?;
    let digest: [u8; 32] = digest_bytes
        .try_into()
        .map_err(|_| Error::Deserialization("Coin digest is not 32 bytes".to_string()))?;

    Ok(GasCoinRef {
        object_id: coin.coin_object_id.parse()?,
        version: json_u64(&coin.version, "coin version")?,
        digest,
    })
}

/// Sui full node client
pub struct SuiRpcClient {
    client: Client,
    endpoint: String,
    gas_budget: u64,
    shared_versions: DashMap<ObjectId, u64>,
}

impl SuiRpcClient {
    pub fn new(config: &RpcConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            gas_budget: config.gas_budget,
            shared_versions: DashMap::new(),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        debug!("RPC {}", method);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Rpc(format!("{} request failed: {}", method, e)))?;

        let body: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::Deserialization(format!("{} response: {}", method, e)))?;

        if let Some(err) = body.error {
            return Err(Error::RpcResponse {
                method: method.to_string(),
                code: err.code,
                message: err.message,
            });
        }

        body.result
            .ok_or_else(|| Error::Rpc(format!("{} returned no result", method)))
    }

    /// Initial shared version of a shared object, cached after the first lookup
    async fn shared_version(&self, id: ObjectId) -> Result<u64> {
        if let Some(version) = self.shared_versions.get(&id) {
            return Ok(*version);
        }

        let object: Value = self
            .call("sui_getObject", json!([id.to_string(), { "showOwner": true }]))
            .await?;

        let version = object
            .pointer("/data/owner/Shared/initial_shared_version")
            .ok_or_else(|| Error::TransactionBuild(format!("Object {} is not shared", id)))
            .and_then(|v| json_u64(v, "initial_shared_version"))?;

        self.shared_versions.insert(id, version);
        Ok(version)
    }

    async fn reference_gas_price(&self) -> Result<u64> {
        let price: Value = self.call("suix_getReferenceGasPrice", json!([])).await?;
        json_u64(&price, "reference gas price")
    }

    async fn gas_coin(&self, owner: SuiAddress) -> Result<GasCoinRef> {
        let page: CoinPage = self
            .call(
                "suix_getCoins",
                json!([owner.to_string(), SUI_COIN_TYPE, Value::Null, COIN_PAGE_SIZE]),
            )
            .await?;
        select_gas_coin(&page.data)
    }
}

#[async_trait]
impl ChainClient for SuiRpcClient {
    async fn submit(&self, identity: &SigningIdentity, call: &MoveCall) -> Result<TxReceipt> {
        let sender = identity.address();

        let mut shared_versions = HashMap::new();
        for arg in &call.arguments {
            if let CallArg::SharedObject(id) = arg {
                shared_versions.insert(*id, self.shared_version(*id).await?);
            }
        }

        let gas = GasParams {
            owner: sender,
            payment: vec![self.gas_coin(sender).await?],
            price: self.reference_gas_price().await?,
            budget: self.gas_budget,
        };

        let tx_bytes = encode_move_call(call, sender, &shared_versions, &gas)?;
        let signature = identity.sign_transaction(&tx_bytes);

        let response: ExecuteResponse = self
            .call(
                "sui_executeTransactionBlock",
                json!([
                    STANDARD.encode(&tx_bytes),
                    [signature],
                    { "showEffects": true },
                    "WaitForLocalExecution"
                ]),
            )
            .await
            .map_err(|e| Error::TransactionSend(e.to_string()))?;

        let digest = response.digest.unwrap_or_default();

        match response.effects {
            Some(effects) if effects.status.status != "success" => {
                Err(Error::TransactionFailed {
                    digest,
                    reason: effects
                        .status
                        .error
                        .unwrap_or_else(|| effects.status.status.clone()),
                })
            }
            Some(_) => Ok(TxReceipt { digest }),
            None => {
                warn!("Node returned no effects for {}", call.target);
                Ok(TxReceipt { digest })
            }
        }
    }
}
