//! Credential loading from environment variables
//!
//! Recognizes `PRIVATE_KEY_*` (raw secrets) and `MNEMONIC_*` (BIP-39
//! phrases). Bad entries are logged and skipped; loading only fails when
//! nothing usable was found.

use tracing::{debug, error, info};

use super::identity::SigningIdentity;
use super::keys::{derive_from_mnemonic, parse_private_key};
use crate::error::{Error, Result};

/// Prefix for raw-secret entries
pub const PRIVATE_KEY_PREFIX: &str = "PRIVATE_KEY_";

/// Prefix for mnemonic entries
pub const MNEMONIC_PREFIX: &str = "MNEMONIC_";

/// Kind of secret an entry carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    PrivateKey,
    Mnemonic,
}

impl SecretKind {
    fn prefix(self) -> &'static str {
        match self {
            SecretKind::PrivateKey => PRIVATE_KEY_PREFIX,
            SecretKind::Mnemonic => MNEMONIC_PREFIX,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            SecretKind::PrivateKey => "private key",
            SecretKind::Mnemonic => "mnemonic",
        }
    }
}

/// Turns environment entries into signing identities
pub struct CredentialLoader {
    vars: Vec<(String, String)>,
}

impl CredentialLoader {
    /// Snapshot the process environment
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Use an explicit list of key/value pairs (encounter order is kept)
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Derive every identity that parses
    ///
    /// Private keys come first, then mnemonics. Returns
    /// [`Error::NoCredentials`] if none could be derived.
    pub fn load(&self) -> Result<Vec<SigningIdentity>> {
        let mut identities = Vec::new();

        for kind in [SecretKind::PrivateKey, SecretKind::Mnemonic] {
            for (key, value) in self.entries(kind) {
                match derive_identity(kind, key, value) {
                    Ok(identity) => {
                        debug!("Loaded {} from {}: {}", kind.describe(), key, identity.address());
                        identities.push(identity);
                    }
                    Err(e) => {
                        error!("Invalid {} for {}: {}", kind.describe(), key, e);
                    }
                }
            }
        }

        if identities.is_empty() {
            error!("No valid private keys or mnemonics found in .env");
            return Err(Error::NoCredentials);
        }

        info!("Loaded {} wallet(s)", identities.len());
        Ok(identities)
    }

    /// Non-empty entries of one family, in encounter order
    fn entries(&self, kind: SecretKind) -> impl Iterator<Item = (&str, &str)> {
        self.vars
            .iter()
            .filter(move |(key, _)| key.starts_with(kind.prefix()))
            .map(|(key, value)| (key.as_str(), value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }
}

fn derive_identity(kind: SecretKind, key: &str, value: &str) -> Result<SigningIdentity> {
    let secret = match kind {
        SecretKind::PrivateKey => parse_private_key(value)?,
        SecretKind::Mnemonic => derive_from_mnemonic(value)?,
    };
    Ok(SigningIdentity::from_secret(key, secret))
}
