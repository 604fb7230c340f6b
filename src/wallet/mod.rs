//! Wallet credentials
//!
//! ```text
//! environment → CredentialLoader → keys (bech32 / keystore / hex / BIP-39)
//!                     ↓
//!              SigningIdentity (address + signer)
//! ```

pub mod credentials;
pub mod identity;
pub mod keys;

pub use credentials::{CredentialLoader, SecretKind, MNEMONIC_PREFIX, PRIVATE_KEY_PREFIX};
pub use identity::SigningIdentity;
pub use keys::{derive_from_mnemonic, parse_private_key};
