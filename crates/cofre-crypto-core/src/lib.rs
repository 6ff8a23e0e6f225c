//! `cofre-crypto-core` — Passphrase-based symmetric cryptography primitives.
//!
//! This crate is the audit target: zero network, zero async, zero I/O.
//! It covers the key-derivation + cipher pipeline of COFRE plus the
//! surrounding utilities:
//!
//! - [`kdf`] — PBKDF2-HMAC-SHA1 passphrase → 256-bit key
//! - [`cipher`] — legacy-compatible AES-256-CBC (confidentiality only)
//! - [`aead`] — AES-256-GCM (recommended: confidentiality + integrity)
//! - [`encoding`] — base-64 transport of salts, IVs, and ciphertexts
//! - [`digest`] — one-shot MD5/SHA-256/SHA-512 and HMAC-SHA256
//! - [`random`] — CSPRNG salts, IVs, and raw keys
//!
//! Every operation is a pure function of its inputs (plus fresh
//! randomness where documented); there is no key cache and no shared
//! state, so all functions are safe to call concurrently.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod encoding;

pub mod digest;

pub mod kdf;

pub mod cipher;
pub mod aead;

pub mod random;

pub use aead::{open, seal, SealedMessage};
pub use cipher::{decrypt, encrypt, IV_LEN};
pub use digest::{digest, hmac_sha256, hmac_sha256_fixed_key, DigestAlgorithm, MAC_LEN};
pub use encoding::{decode, encode};
pub use error::CryptoError;
pub use kdf::{derive_key, ITERATIONS, KEY_LEN, SALT_LEN};
pub use memory::SecretBuffer;
pub use random::{random_iv, random_salt, random_symmetric_key};
