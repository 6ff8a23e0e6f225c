//! AES-256-GCM authenticated pipeline — the recommended path.
//!
//! Unlike [`crate::cipher`], this mode detects tampering: the ciphertext
//! carries a 128-bit authentication tag, and [`open`] fails if the tag,
//! nonce, or ciphertext was modified or the passphrase is wrong. The key
//! is re-derived from (passphrase, salt) per call, exactly as in the CBC
//! pipeline; the nonce is generated fresh per [`seal`] and travels inside
//! the sealed payload, so callers only store the salt alongside it.

use crate::encoding;
use crate::error::CryptoError;
use crate::kdf;
use rand::rngs::OsRng;
use rand::RngCore;
use ring::aead;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// AES-256-GCM nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// AES-256-GCM authentication tag length in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// Minimum wire length: nonce + empty ciphertext + tag.
const MIN_SEALED_LEN: usize = NONCE_LEN + TAG_LEN;

/// Authenticated ciphertext container.
///
/// Wire format: `nonce (12 bytes) || ciphertext (variable) || tag (16 bytes)`.
#[must_use = "sealed data must be stored or transmitted"]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SealedMessage {
    /// 96-bit random nonce, unique per seal.
    pub nonce: [u8; NONCE_LEN],
    /// Encrypted payload (same length as the plaintext).
    pub ciphertext: Vec<u8>,
    /// 128-bit authentication tag.
    pub tag: [u8; TAG_LEN],
}

impl SealedMessage {
    /// Serialize to the wire format `nonce || ciphertext || tag`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let capacity = NONCE_LEN
            .saturating_add(self.ciphertext.len())
            .saturating_add(TAG_LEN);
        let mut out = Vec::with_capacity(capacity);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Parse the wire format `nonce || ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Cipher` if the input is shorter than 28 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < MIN_SEALED_LEN {
            return Err(CryptoError::Cipher(format!(
                "sealed payload too short: {} bytes (minimum {MIN_SEALED_LEN})",
                bytes.len()
            )));
        }

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&bytes[..NONCE_LEN]);

        // The length guard above makes this subtraction infallible; kept
        // checked for the workspace arithmetic_side_effects lint.
        let ct_end = bytes
            .len()
            .checked_sub(TAG_LEN)
            .ok_or_else(|| CryptoError::Cipher("sealed payload length underflow".into()))?;
        let ciphertext = bytes[NONCE_LEN..ct_end].to_vec();

        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&bytes[ct_end..]);

        Ok(Self {
            nonce,
            ciphertext,
            tag,
        })
    }

    /// Encode the wire format as base-64 text.
    #[must_use]
    pub fn to_base64(&self) -> String {
        encoding::encode(&self.to_bytes())
    }

    /// Decode base-64 text into a `SealedMessage`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Encoding` for malformed base-64, or
    /// `CryptoError::Cipher` for a too-short payload.
    pub fn from_base64(text: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(&encoding::decode(text)?)
    }
}

/// Encrypt and authenticate UTF-8 plaintext, returning base-64 text.
///
/// The salt arrives base-64 encoded, as in the CBC pipeline. A fresh
/// 96-bit nonce is drawn from the CSPRNG on every call.
///
/// # Errors
///
/// - `CryptoError::Encoding` — malformed base-64 salt
/// - `CryptoError::KeyDerivation` — salt rejected by the KDF
/// - `CryptoError::RandomSource` — CSPRNG failure
/// - `CryptoError::Cipher` — AEAD setup failure
pub fn seal(passphrase: &str, salt_text: &str, plaintext: &str) -> Result<String, CryptoError> {
    let salt = encoding::decode(salt_text)?;
    let key = kdf::derive_key(passphrase, &salt)?;
    let sealing_key = gcm_key(key.expose())?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|e| CryptoError::RandomSource(format!("CSPRNG fill failed: {e}")))?;
    let nonce = aead::Nonce::assume_unique_for_key(nonce_bytes);

    let mut in_out = plaintext.as_bytes().to_vec();
    let Ok(tag) = sealing_key.seal_in_place_separate_tag(nonce, aead::Aad::empty(), &mut in_out)
    else {
        in_out.zeroize();
        return Err(CryptoError::Cipher("AES-256-GCM sealing failed".into()));
    };

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_ref());

    let sealed = SealedMessage {
        nonce: nonce_bytes,
        ciphertext: in_out,
        tag: tag_bytes,
    };
    Ok(sealed.to_base64())
}

/// Authenticate and decrypt base-64 sealed text, returning the plaintext.
///
/// # Errors
///
/// - `CryptoError::Encoding` — malformed base-64 input
/// - `CryptoError::Cipher` — payload too short, or AEAD setup failure
/// - `CryptoError::KeyDerivation` — salt rejected by the KDF
/// - `CryptoError::Decryption` — tag mismatch (wrong passphrase or
///   tampered payload) or non-UTF-8 recovered plaintext
pub fn open(passphrase: &str, salt_text: &str, sealed_text: &str) -> Result<String, CryptoError> {
    let sealed = SealedMessage::from_base64(sealed_text)?;
    let salt = encoding::decode(salt_text)?;
    let key = kdf::derive_key(passphrase, &salt)?;
    let opening_key = gcm_key(key.expose())?;

    let nonce = aead::Nonce::assume_unique_for_key(sealed.nonce);

    let mut ct_tag = Vec::with_capacity(sealed.ciphertext.len().saturating_add(TAG_LEN));
    ct_tag.extend_from_slice(&sealed.ciphertext);
    ct_tag.extend_from_slice(&sealed.tag);

    let plaintext_slice = opening_key
        .open_in_place(nonce, aead::Aad::empty(), &mut ct_tag)
        .map_err(|_| CryptoError::Decryption)?;

    let plaintext = String::from_utf8(plaintext_slice.to_vec()).map_err(|e| {
        let mut garbled = e.into_bytes();
        garbled.zeroize();
        CryptoError::Decryption
    });
    ct_tag.zeroize();
    plaintext
}

fn gcm_key(key: &[u8]) -> Result<aead::LessSafeKey, CryptoError> {
    let unbound = aead::UnboundKey::new(&aead::AES_256_GCM, key)
        .map_err(|_| CryptoError::Cipher("failed to create AES-256-GCM key".into()))?;
    Ok(aead::LessSafeKey::new(unbound))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSPHRASE: &str = "correct horse";
    /// base-64 of 20 zero bytes.
    const ZERO_SALT: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAA=";

    #[test]
    fn seal_open_roundtrip() {
        let sealed = seal(PASSPHRASE, ZERO_SALT, "hola mundo").expect("seal should succeed");
        let opened = open(PASSPHRASE, ZERO_SALT, &sealed).expect("open should succeed");
        assert_eq!(opened, "hola mundo");
    }

    #[test]
    fn seal_open_roundtrip_empty_plaintext() {
        let sealed = seal(PASSPHRASE, ZERO_SALT, "").expect("seal empty should succeed");
        let opened = open(PASSPHRASE, ZERO_SALT, &sealed).expect("open empty should succeed");
        assert_eq!(opened, "");
    }

    #[test]
    fn two_seals_produce_different_outputs() {
        let a = seal(PASSPHRASE, ZERO_SALT, "same data").expect("seal a");
        let b = seal(PASSPHRASE, ZERO_SALT, "same data").expect("seal b");
        assert_ne!(a, b, "random nonces must differ");
    }

    #[test]
    fn open_fails_with_wrong_passphrase() {
        let sealed = seal(PASSPHRASE, ZERO_SALT, "secreto").expect("seal should succeed");
        let result = open("incorrect horse", ZERO_SALT, &sealed);
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn open_fails_on_any_tampered_byte() {
        let sealed = seal(PASSPHRASE, ZERO_SALT, "secreto").expect("seal should succeed");
        let raw = crate::encoding::decode(&sealed).expect("sealed text decodes");
        for index in 0..raw.len() {
            let mut tampered = raw.clone();
            tampered[index] ^= 0x80;
            let result = open(PASSPHRASE, ZERO_SALT, &crate::encoding::encode(&tampered));
            assert!(
                matches!(result, Err(CryptoError::Decryption)),
                "flipping byte {index} must fail authentication"
            );
        }
    }

    #[test]
    fn sealed_message_wire_roundtrip() {
        let sealed = seal(PASSPHRASE, ZERO_SALT, "wire test").expect("seal should succeed");
        let parsed = SealedMessage::from_base64(&sealed).expect("parse should succeed");
        let rebuilt = SealedMessage::from_bytes(&parsed.to_bytes()).expect("rebuild");
        assert_eq!(parsed.nonce, rebuilt.nonce);
        assert_eq!(parsed.ciphertext, rebuilt.ciphertext);
        assert_eq!(parsed.tag, rebuilt.tag);
        assert_eq!(parsed.to_base64(), sealed);
    }

    #[test]
    fn from_bytes_rejects_short_input() {
        let result = SealedMessage::from_bytes(&[0u8; MIN_SEALED_LEN - 1]);
        assert!(matches!(result, Err(CryptoError::Cipher(_))));
    }

    #[test]
    fn from_base64_rejects_malformed_text() {
        let result = SealedMessage::from_base64("not base64!");
        assert!(matches!(result, Err(CryptoError::Encoding(_))));
    }

    #[test]
    fn sealed_message_serde_roundtrip() {
        let sealed = seal(PASSPHRASE, ZERO_SALT, "serde test").expect("seal should succeed");
        let parsed = SealedMessage::from_base64(&sealed).expect("parse should succeed");
        let json = serde_json::to_string(&parsed).expect("serialize should succeed");
        let deserialized: SealedMessage =
            serde_json::from_str(&json).expect("deserialize should succeed");
        assert_eq!(parsed.nonce, deserialized.nonce);
        assert_eq!(parsed.ciphertext, deserialized.ciphertext);
        assert_eq!(parsed.tag, deserialized.tag);
    }
}
