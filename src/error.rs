//! Error types for the cycler

use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the cycler
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Credential errors
    #[error("Invalid keypair: {0}")]
    InvalidKeypair(String),

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("No valid private keys or mnemonics found in environment")]
    NoCredentials,

    // RPC errors
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("RPC call {method} failed with code {code}: {message}")]
    RpcResponse {
        method: String,
        code: i64,
        message: String,
    },

    // Transaction errors
    #[error("Transaction build failed: {0}")]
    TransactionBuild(String),

    #[error("Transaction send failed: {0}")]
    TransactionSend(String),

    #[error("Transaction {digest} failed on-chain: {reason}")]
    TransactionFailed { digest: String, reason: String },

    #[error("Wrap failed for {address}: {reason}")]
    WrapFailed { address: String, reason: String },

    // Input errors
    #[error("Invalid cycle count: {0}")]
    InvalidCycleCount(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

// Conversion from reqwest errors
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Rpc(e.to_string())
    }
}

// Conversion from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

// Conversion from I/O errors
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
