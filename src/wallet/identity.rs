//! Signing identities
//!
//! An ed25519 keypair together with its Sui address. Created once by the
//! credential loader and never mutated afterwards.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{Signer, SigningKey};

use crate::chain::tx::blake2b256;
use crate::chain::SuiAddress;

/// Signature scheme flag for ed25519 keys
pub const ED25519_FLAG: u8 = 0x00;

/// Intent prefix for transaction data: scope, version, app id
const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

/// A keypair able to sign transactions for one Sui address
pub struct SigningIdentity {
    label: String,
    signing_key: SigningKey,
    address: SuiAddress,
}

impl SigningIdentity {
    /// Build an identity from a 32-byte ed25519 secret
    pub fn from_secret(label: impl Into<String>, secret: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&secret);
        let public_key = signing_key.verifying_key().to_bytes();
        let address = SuiAddress(blake2b256(&[&[ED25519_FLAG], &public_key]));

        Self {
            label: label.into(),
            signing_key,
            address,
        }
    }

    /// Name of the credential entry this identity came from
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn address(&self) -> SuiAddress {
        self.address
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign encoded transaction data
    ///
    /// Returns the base64 serialized signature `flag || sig || pubkey`.
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> String {
        let digest = blake2b256(&[&TRANSACTION_INTENT, tx_bytes]);
        let signature = self.signing_key.sign(&digest);

        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(&self.public_key());

        STANDARD.encode(serialized)
    }
}

impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("label", &self.label)
            .field("address", &self.address.to_string())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    #[test]
    fn test_address_is_deterministic() {
        let a = SigningIdentity::from_secret("a", [7u8; 32]);
        let b = SigningIdentity::from_secret("b", [7u8; 32]);
        let c = SigningIdentity::from_secret("c", [8u8; 32]);
        assert_eq!(a.address(), b.address());
        assert_ne!(a.address(), c.address());
        assert_eq!(a.address().to_string().len(), 66);
    }

    #[test]
    fn test_signature_layout_and_validity() {
        let identity = SigningIdentity::from_secret("test", [3u8; 32]);
        let tx = b"transaction bytes";
        let encoded = identity.sign_transaction(tx);
        let raw = STANDARD.decode(encoded).unwrap();

        assert_eq!(raw.len(), 97);
        assert_eq!(raw[0], ED25519_FLAG);
        assert_eq!(&raw[65..], &identity.public_key());

        let sig_bytes: [u8; 64] = raw[1..65].try_into().unwrap();
        let signature = Signature::from_bytes(&sig_bytes);
        let verifying_key = VerifyingKey::from_bytes(&identity.public_key()).unwrap();
        let digest = blake2b256(&[&TRANSACTION_INTENT, tx]);
        assert!(verifying_key.verify(&digest, &signature).is_ok());
    }

    #[test]
    fn test_debug_hides_secret() {
        let identity = SigningIdentity::from_secret("PRIVATE_KEY_1", [1u8; 32]);
        let debug = format!("{:?}", identity);
        assert!(debug.contains("PRIVATE_KEY_1"));
        assert!(!debug.contains("signing_key"));
    }
}
