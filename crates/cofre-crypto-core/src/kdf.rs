//! PBKDF2 key derivation from a passphrase and salt.
//!
//! PBKDF2-HMAC-SHA1 with a fixed iteration count of 65 536 and a 256-bit
//! output, matching the ciphertexts produced by the legacy system. The
//! high iteration count is the slow-hash defense against offline
//! brute-force of weak passphrases and must not be lowered.
//!
//! Derivation is deterministic and stateless: the cipher pipelines
//! recompute the key from (passphrase, salt) on every call instead of
//! caching it, so no key material stays resident between operations.

use crate::error::CryptoError;
use crate::memory::SecretBuffer;
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use zeroize::Zeroize;

/// PBKDF2 iteration count. Fixed — part of the ciphertext format.
pub const ITERATIONS: u32 = 65_536;

/// Derived key length in bytes (256 bits, AES-256).
pub const KEY_LEN: usize = 32;

/// Standard salt length in bytes produced by [`crate::random::random_salt`].
pub const SALT_LEN: usize = 20;

/// Defensive floor below the standard salt length.
const MIN_SALT_LEN: usize = 8;

/// Derive a 256-bit key from a passphrase and salt.
///
/// The passphrase contributes its UTF-8 bytes; the salt is raw bytes.
/// Identical `(passphrase, salt)` always yields the identical key.
///
/// The intermediate output buffer is zeroized after being copied into
/// the returned [`SecretBuffer`].
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if the salt is shorter than
/// 8 bytes, or `CryptoError::SecureMemory` if the secret buffer cannot
/// be allocated.
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Result<SecretBuffer, CryptoError> {
    if salt.len() < MIN_SALT_LEN {
        return Err(CryptoError::KeyDerivation(format!(
            "salt too short: {} bytes (minimum {MIN_SALT_LEN})",
            salt.len()
        )));
    }

    let mut output = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha1>(passphrase.as_bytes(), salt, ITERATIONS, &mut output);

    let result = SecretBuffer::new(&output);
    output.zeroize();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SALT: &[u8; SALT_LEN] = b"0123456789abcdefghij";

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn derive_produces_32_byte_output() {
        let key = derive_key("correct horse", TEST_SALT).expect("derive should succeed");
        assert_eq!(key.len(), KEY_LEN);
    }

    #[test]
    fn derive_is_deterministic() {
        let a = derive_key("correct horse", TEST_SALT).expect("derive should succeed");
        let b = derive_key("correct horse", TEST_SALT).expect("derive should succeed");
        assert_eq!(a.expose(), b.expose());
    }

    #[test]
    fn derive_known_answer() {
        // PBKDF2-HMAC-SHA1, 65 536 iterations, dkLen 32.
        let key = derive_key("correct horse", TEST_SALT).expect("derive should succeed");
        assert_eq!(
            hex(key.expose()),
            "617d4e7379a0a1e3574c96dc7742bacb990d53485576b42dd46e1b1229133e29"
        );
    }

    #[test]
    fn derive_known_answer_zero_salt() {
        let key = derive_key("correct horse", &[0u8; SALT_LEN]).expect("derive should succeed");
        assert_eq!(
            hex(key.expose()),
            "6c7c704d988b45832b2a2cb330f1288f5dc3c8714b2a3e69576ed14a922cc50d"
        );
    }

    #[test]
    fn different_salts_produce_different_keys() {
        let a = derive_key("correct horse", b"salt-aaaaaaaaaaaaaaa").expect("derive a");
        let b = derive_key("correct horse", b"salt-bbbbbbbbbbbbbbb").expect("derive b");
        assert_ne!(a.expose(), b.expose());
    }

    #[test]
    fn different_passphrases_produce_different_keys() {
        let a = derive_key("passphrase a", TEST_SALT).expect("derive a");
        let b = derive_key("passphrase b", TEST_SALT).expect("derive b");
        assert_ne!(a.expose(), b.expose());
    }

    #[test]
    fn rejects_short_salt() {
        let err = derive_key("pass", b"short").expect_err("derive should reject short salt");
        assert!(matches!(err, CryptoError::KeyDerivation(_)));
        assert!(format!("{err}").contains("salt too short"));
    }

    #[test]
    fn output_is_masked_secret_buffer() {
        let key = derive_key("pass", TEST_SALT).expect("derive should succeed");
        assert_eq!(format!("{key:?}"), "SecretBuffer(***)");
    }
}
