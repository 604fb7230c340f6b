//! Dubhe Cycler Library
//!
//! Runs a fixed wrap → swap → add-liquidity routine against the Dubhe DEX on
//! Sui for every configured wallet, cycle after cycle.

pub mod actions;
pub mod chain;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod wallet;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
