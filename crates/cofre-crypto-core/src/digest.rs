//! One-shot digests and HMAC-SHA256 over opaque byte payloads.
//!
//! Stateless helpers, independent of the cipher pipeline. The digest
//! algorithm set is fixed: `MD5`, `SHA-256`, `SHA-512` — any other
//! identifier is an error, never a silent fallback.

use crate::error::CryptoError;
use hmac::{Hmac, Mac};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// HMAC-SHA256 output length in bytes.
pub const MAC_LEN: usize = 32;

/// The 16-byte MAC key hardcoded by the legacy system (bytes 0..=15).
///
/// Kept only for interop with MACs produced by the original tool — see
/// [`hmac_sha256_fixed_key`].
const LEGACY_MAC_KEY: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// Supported digest algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// MD5 — 16-byte output. Broken for collision resistance; provided
    /// for checksum interop only.
    Md5,
    /// SHA-256 — 32-byte output.
    Sha256,
    /// SHA-512 — 64-byte output.
    Sha512,
}

impl DigestAlgorithm {
    /// Fixed output length in bytes for this algorithm.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CryptoError;

    /// Accepts exactly `"MD5"`, `"SHA-256"`, and `"SHA-512"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MD5" => Ok(Self::Md5),
            "SHA-256" => Ok(Self::Sha256),
            "SHA-512" => Ok(Self::Sha512),
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_owned())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Md5 => "MD5",
            Self::Sha256 => "SHA-256",
            Self::Sha512 => "SHA-512",
        })
    }
}

/// Compute a one-shot digest of `payload`.
///
/// Deterministic and pure. Output length is fixed per algorithm
/// ([`DigestAlgorithm::output_len`]).
#[must_use]
pub fn digest(algorithm: DigestAlgorithm, payload: &[u8]) -> Vec<u8> {
    match algorithm {
        DigestAlgorithm::Md5 => Md5::digest(payload).to_vec(),
        DigestAlgorithm::Sha256 => Sha256::digest(payload).to_vec(),
        DigestAlgorithm::Sha512 => Sha512::digest(payload).to_vec(),
    }
}

/// Compute HMAC-SHA256 over `payload` with a caller-supplied key.
///
/// This is the production MAC path. Any key length is accepted; keys
/// longer than the SHA-256 block size are hashed down per RFC 2104.
///
/// # Errors
///
/// Returns `CryptoError::Cipher` if the MAC cannot be keyed (does not
/// occur for any key length with HMAC; defensive only).
pub fn hmac_sha256(key: &[u8], payload: &[u8]) -> Result<[u8; MAC_LEN], CryptoError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| CryptoError::Cipher(format!("MAC key rejected: {e}")))?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().into())
}

/// Compute HMAC-SHA256 with the legacy hardcoded 16-byte key.
///
/// The original system fixed the MAC key to bytes `0..=15`, which defeats
/// authentication against anyone who can read the binary. This variant
/// exists only to verify MACs produced by that system. New callers must
/// use [`hmac_sha256`] with their own key.
///
/// # Errors
///
/// Same defensive contract as [`hmac_sha256`].
pub fn hmac_sha256_fixed_key(payload: &[u8]) -> Result<[u8; MAC_LEN], CryptoError> {
    hmac_sha256(&LEGACY_MAC_KEY, payload)
}
