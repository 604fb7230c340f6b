//! Secret key decoding and mnemonic derivation
//!
//! Supported raw-secret formats:
//! - Bech32 `suiprivkey1...` (scheme flag + 32-byte secret)
//! - Base64 `sui.keystore` entries (scheme flag + 32-byte secret)
//! - Hex, with or without `0x`, of the 32-byte secret
//!
//! Mnemonics are BIP-39 English phrases derived with SLIP-0010 along
//! `m/44'/784'/0'/0'/0'`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bip39::{Language, Mnemonic};
use hmac::{Hmac, Mac};
use sha2::Sha512;

use super::identity::ED25519_FLAG;
use crate::error::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

/// Human-readable part of bech32 encoded Sui private keys
pub const SUI_PRIVATE_KEY_PREFIX: &str = "suiprivkey";

/// Default Sui ed25519 derivation path, all hardened
pub const DERIVATION_PATH: [u32; 5] = [44, 784, 0, 0, 0];

const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Decode a raw secret in any supported format into 32 secret bytes
pub fn parse_private_key(value: &str) -> Result<[u8; 32]> {
    let value = value.trim();

    if value.to_lowercase().starts_with(SUI_PRIVATE_KEY_PREFIX) {
        return decode_bech32(value);
    }

    let hex_digits = value.strip_prefix("0x").unwrap_or(value);
    if hex_digits.len() == 64 && hex_digits.chars().all(|c| c.is_ascii_hexdigit()) {
        let mut secret = [0u8; 32];
        hex::decode_to_slice(hex_digits, &mut secret)
            .map_err(|e| Error::InvalidKeypair(format!("bad hex secret: {}", e)))?;
        return Ok(secret);
    }

    let bytes = STANDARD
        .decode(value)
        .map_err(|_| Error::InvalidKeypair("unrecognized private key format".to_string()))?;
    flagged_secret(&bytes)
}

fn decode_bech32(value: &str) -> Result<[u8; 32]> {
    let (hrp, data) = bech32::decode(value)
        .map_err(|e| Error::InvalidKeypair(format!("bad bech32 encoding: {}", e)))?;

    if hrp.to_lowercase() != SUI_PRIVATE_KEY_PREFIX {
        return Err(Error::InvalidKeypair(format!(
            "unexpected prefix {}",
            hrp.to_lowercase()
        )));
    }

    flagged_secret(&data)
}

/// Split `flag || secret` and check it is an ed25519 key
fn flagged_secret(bytes: &[u8]) -> Result<[u8; 32]> {
    if bytes.len() != 33 {
        return Err(Error::InvalidKeypair(format!(
            "expected 33 bytes (flag + secret), got {}",
            bytes.len()
        )));
    }

    if bytes[0] != ED25519_FLAG {
        return Err(Error::InvalidKeypair(format!(
            "unsupported signature scheme flag {:#04x}, only ed25519 is supported",
            bytes[0]
        )));
    }

    let mut secret = [0u8; 32];
    secret.copy_from_slice(&bytes[1..]);
    Ok(secret)
}

/// Derive the ed25519 secret for a BIP-39 phrase
pub fn derive_from_mnemonic(phrase: &str) -> Result<[u8; 32]> {
    let normalized = phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");

    let mnemonic = Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| Error::InvalidMnemonic(e.to_string()))?;

    let seed = mnemonic.to_seed("");
    slip10_derive(&seed, &DERIVATION_PATH)
}

/// SLIP-0010 ed25519 derivation; every index is hardened
fn slip10_derive(seed: &[u8], path: &[u32]) -> Result<[u8; 32]> {
    let (mut key, mut chain_code) = hmac_split(b"ed25519 seed", &[seed])?;

    for index in path {
        let hardened = (index | HARDENED_OFFSET).to_be_bytes();
        (key, chain_code) = hmac_split(&chain_code, &[&[0u8], &key, &hardened])?;
    }

    Ok(key)
}

fn hmac_split(key: &[u8], parts: &[&[u8]]) -> Result<([u8; 32], [u8; 32])> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| Error::InvalidMnemonic(format!("key derivation failed: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    let output = mac.finalize().into_bytes();

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&output[..32]);
    right.copy_from_slice(&output[32..]);
    Ok((left, right))
}
