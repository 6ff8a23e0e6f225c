//! AES-256-CBC pipeline with PKCS#7 padding.
//!
//! Legacy-compatible confidentiality-only encryption. Salt and IV travel
//! base-64 encoded alongside the ciphertext; the key is re-derived from
//! (passphrase, salt) on every call via [`crate::kdf`].
//!
//! # No integrity protection
//!
//! CBC with padding authenticates nothing: a tampered ciphertext either
//! fails to unpad or decrypts to garbage, and neither outcome proves
//! anything about the sender. Use [`crate::aead`] unless bit-exact
//! interop with existing CBC ciphertexts is required.

use crate::encoding;
use crate::error::CryptoError;
use crate::kdf;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroize;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size in bytes; also the required IV length.
pub const IV_LEN: usize = 16;

/// Encrypt UTF-8 plaintext, returning base-64 ciphertext.
///
/// `iv_text` and `salt_text` are base-64 (the form in which they are
/// stored and transported). The IV must decode to exactly 16 bytes and
/// must never be reused for two different plaintexts under the same
/// derived key.
///
/// # Errors
///
/// - `CryptoError::Encoding` — `iv_text` or `salt_text` is not valid base-64
/// - `CryptoError::Cipher` — decoded IV is not 16 bytes
/// - `CryptoError::KeyDerivation` — salt rejected by the KDF
pub fn encrypt(
    passphrase: &str,
    iv_text: &str,
    salt_text: &str,
    plaintext: &str,
) -> Result<String, CryptoError> {
    let iv = decode_iv(iv_text)?;
    let salt = encoding::decode(salt_text)?;
    let key = kdf::derive_key(passphrase, &salt)?;

    let cipher = Aes256CbcEnc::new_from_slices(key.expose(), &iv)
        .map_err(|e| CryptoError::Cipher(format!("cipher initialization failed: {e}")))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    Ok(encoding::encode(&ciphertext))
}

/// Decrypt base-64 ciphertext, returning the recovered UTF-8 plaintext.
///
/// Must be called with the same (passphrase, salt, IV) triple used at
/// encryption time.
///
/// # Errors
///
/// - `CryptoError::Encoding` — any input is not valid base-64
/// - `CryptoError::Cipher` — IV is not 16 bytes, or the ciphertext is
///   empty or not block-aligned
/// - `CryptoError::Decryption` — bad padding after decryption (wrong
///   passphrase, wrong IV, or tampered ciphertext) or the recovered
///   bytes are not valid UTF-8
pub fn decrypt(
    passphrase: &str,
    iv_text: &str,
    salt_text: &str,
    ciphertext_text: &str,
) -> Result<String, CryptoError> {
    let iv = decode_iv(iv_text)?;
    let salt = encoding::decode(salt_text)?;
    let ciphertext = encoding::decode(ciphertext_text)?;

    if ciphertext.is_empty() || !ciphertext.len().is_multiple_of(IV_LEN) {
        return Err(CryptoError::Cipher(format!(
            "ciphertext length {} is not a positive multiple of the block size",
            ciphertext.len()
        )));
    }

    let key = kdf::derive_key(passphrase, &salt)?;
    let cipher = Aes256CbcDec::new_from_slices(key.expose(), &iv)
        .map_err(|e| CryptoError::Cipher(format!("cipher initialization failed: {e}")))?;

    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CryptoError::Decryption)?;

    // The original tool nulled the payload on invalid UTF-8; here it is a
    // typed failure, indistinguishable from any other integrity failure.
    String::from_utf8(plaintext).map_err(|e| {
        let mut garbled = e.into_bytes();
        garbled.zeroize();
        CryptoError::Decryption
    })
}

fn decode_iv(iv_text: &str) -> Result<Vec<u8>, CryptoError> {
    let iv = encoding::decode(iv_text)?;
    if iv.len() != IV_LEN {
        return Err(CryptoError::Cipher(format!(
            "invalid IV length: {} bytes (expected {IV_LEN})",
            iv.len()
        )));
    }
    Ok(iv)
}
