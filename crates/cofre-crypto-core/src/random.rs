//! Random material: salts, IVs, and raw symmetric keys.
//!
//! Everything comes from the operating system CSPRNG (`OsRng`). A failed
//! draw is a hard `RandomSource` error — there is no fallback to a
//! non-cryptographic generator. Outputs carry no determinism guarantee,
//! the inverse of the KDF's contract.

use crate::cipher::IV_LEN;
use crate::error::CryptoError;
use crate::kdf::{KEY_LEN, SALT_LEN};
use crate::memory::SecretBuffer;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

/// Generate a fresh 20-byte salt for key derivation.
///
/// Salts are public and may be stored beside the ciphertext, but a new
/// one should be drawn per unrelated secret.
///
/// # Errors
///
/// Returns `CryptoError::RandomSource` if the CSPRNG fails.
pub fn random_salt() -> Result<[u8; SALT_LEN], CryptoError> {
    fill_random()
}

/// Generate a fresh 16-byte IV for the CBC pipeline.
///
/// The IV is public but must be unique per encryption under the same
/// derived key.
///
/// # Errors
///
/// Returns `CryptoError::RandomSource` if the CSPRNG fails.
pub fn random_iv() -> Result<[u8; IV_LEN], CryptoError> {
    fill_random()
}

/// Generate a raw 256-bit symmetric key.
///
/// Alternative to passphrase derivation for callers who can store key
/// material directly. Independent of [`crate::kdf`].
///
/// # Errors
///
/// Returns `CryptoError::RandomSource` if the CSPRNG fails, or
/// `CryptoError::SecureMemory` if the secret buffer cannot be allocated.
pub fn random_symmetric_key() -> Result<SecretBuffer, CryptoError> {
    let mut bytes = fill_random::<KEY_LEN>()?;
    let key = SecretBuffer::new(&bytes);
    bytes.zeroize();
    key
}

fn fill_random<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut bytes = [0u8; N];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::RandomSource(format!("CSPRNG fill failed: {e}")))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn salt_has_standard_length() {
        let salt = random_salt().expect("salt generation should succeed");
        assert_eq!(salt.len(), SALT_LEN);
    }

    #[test]
    fn iv_matches_block_size() {
        let iv = random_iv().expect("IV generation should succeed");
        assert_eq!(iv.len(), IV_LEN);
    }

    #[test]
    fn key_is_256_bits_and_masked() {
        let key = random_symmetric_key().expect("key generation should succeed");
        assert_eq!(key.len(), KEY_LEN);
        assert_eq!(format!("{key:?}"), "SecretBuffer(***)");
    }

    #[test]
    fn salts_are_distinct_across_many_draws() {
        let mut seen = HashSet::new();
        for _ in 0..64 {
            assert!(seen.insert(random_salt().expect("salt generation should succeed")));
        }
    }

    #[test]
    fn ivs_are_distinct_across_many_draws() {
        let mut seen = HashSet::new();
        for _ in 0..64 {
            assert!(seen.insert(random_iv().expect("IV generation should succeed")));
        }
    }

    #[test]
    fn keys_are_not_all_zero() {
        let key = random_symmetric_key().expect("key generation should succeed");
        assert!(key.expose().iter().any(|&b| b != 0));
    }
}
