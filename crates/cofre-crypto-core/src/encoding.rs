//! Base-64 transcoding of binary material (salts, IVs, ciphertexts).
//!
//! RFC 4648 §4 standard alphabet (`+`, `/`) with `=` padding. Salts, IVs,
//! and ciphertexts cross the crate boundary in this encoding so callers
//! can store and transport them as plain text.

use crate::error::CryptoError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode raw bytes as base-64 text.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode base-64 text back to raw bytes.
///
/// # Errors
///
/// Returns `CryptoError::Encoding` if the input contains characters
/// outside the standard alphabet or has invalid padding.
pub fn decode(text: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(text)
        .map_err(|e| CryptoError::Encoding(e.to_string()))
}
