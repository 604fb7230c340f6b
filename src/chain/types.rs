//! On-chain call descriptions shared by the executors and the clients

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Length of Sui addresses and object ids in bytes
pub const ADDRESS_LENGTH: usize = 32;

/// 32-byte Sui account address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuiAddress(pub [u8; ADDRESS_LENGTH]);

/// 32-byte Sui object id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub [u8; ADDRESS_LENGTH]);

/// Parse `0x`-prefixed hex, left-padding short forms like `0x2`
fn parse_hex_32(s: &str) -> Result<[u8; ADDRESS_LENGTH]> {
    let digits = s.trim().strip_prefix("0x").unwrap_or(s.trim());
    if digits.is_empty() || digits.len() > ADDRESS_LENGTH * 2 {
        return Err(Error::Config(format!("Invalid 32-byte hex id: {}", s)));
    }

    let padded = format!("{:0>64}", digits);
    let mut out = [0u8; ADDRESS_LENGTH];
    hex::decode_to_slice(&padded, &mut out)
        .map_err(|e| Error::Config(format!("Invalid 32-byte hex id {}: {}", s, e)))?;
    Ok(out)
}

impl FromStr for SuiAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex_32(s).map(SuiAddress)
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex_32(s).map(ObjectId)
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Fully qualified Move entry point `package::module::function`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTarget {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
}

impl MoveTarget {
    pub fn new(package: ObjectId, module: &str, function: &str) -> Self {
        Self {
            package,
            module: module.to_string(),
            function: function.to_string(),
        }
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

/// One argument of a Move call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// Shared object passed by mutable reference
    SharedObject(ObjectId),
    /// Coin of the given amount split off the gas coin
    SplitGas(u64),
    /// `u256` value
    U256(u128),
    /// `address` value
    Address(SuiAddress),
    /// `vector<u256>` value
    U256Vector(Vec<u128>),
}

/// A single Move call submitted as its own transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCall {
    pub target: MoveTarget,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<CallArg>,
}

/// Receipt of an executed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Transaction digest (base58); empty if the node did not report one
    pub digest: String,
}
