//! Cryptographic error types for `cofre-crypto-core`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
///
/// Error messages never contain passphrases, key material, or plaintext.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Malformed base-64 input (character outside the alphabet, bad padding).
    #[error("base64 decoding failed: {0}")]
    Encoding(String),

    /// Key derivation failed (PRF failure, invalid salt).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Cipher setup or input-shape failure (invalid key/IV length,
    /// ciphertext not block-aligned).
    #[error("cipher error: {0}")]
    Cipher(String),

    /// Decryption produced data that failed its integrity check.
    ///
    /// Covers bad PKCS#7 padding, AEAD tag mismatch, and non-UTF-8
    /// recovered plaintext. Deliberately carries no detail: the message
    /// must not reveal whether the key was wrong or the ciphertext
    /// corrupted.
    #[error("decryption failed: ciphertext integrity check failed")]
    Decryption,

    /// Unknown digest algorithm identifier.
    #[error("unsupported digest algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    /// The CSPRNG is unavailable or failed to produce bytes.
    #[error("secure random source unavailable: {0}")]
    RandomSource(String),

    /// Secret buffer allocation failure.
    #[error("secure memory error: {0}")]
    SecureMemory(String),
}
