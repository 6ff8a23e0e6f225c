//! Secure memory for derived keys and other secret byte strings.
//!
//! [`SecretBuffer`] wraps [`secrecy::SecretSlice`] and adds:
//! - zeroization on drop (via `secrecy`'s built-in `Zeroize`)
//! - best-effort `mlock` so key material is not swapped to disk
//! - masked `Debug`/`Display` output

use crate::error::CryptoError;
use secrecy::{ExposeSecret, SecretSlice};
use std::fmt;

/// RAII guard over an `mlock`'d region. Unlocks on drop.
///
/// Locking is best-effort: if `mlock` fails (privileges, RLIMIT_MEMLOCK),
/// the buffer still works, it just may be swapped. The zeroize-on-drop
/// guarantee does not depend on lock status.
struct PageLock {
    ptr: *const u8,
    len: usize,
    locked: bool,
}

// SAFETY: the pointer is only passed to mlock/munlock, which are
// thread-safe. The pointed-to data is owned by the enclosing SecretBuffer
// and never dereferenced through PageLock.
unsafe impl Send for PageLock {}
unsafe impl Sync for PageLock {}

impl PageLock {
    fn acquire(ptr: *const u8, len: usize) -> Self {
        let locked = platform::try_mlock(ptr, len);
        Self { ptr, len, locked }
    }
}

impl Drop for PageLock {
    fn drop(&mut self) {
        if self.locked {
            platform::try_munlock(self.ptr, self.len);
        }
    }
}

/// Variable-length buffer for sensitive bytes (derived keys, raw symmetric
/// keys). Contents are zeroized when the buffer is dropped.
pub struct SecretBuffer {
    inner: SecretSlice<u8>,
    lock: PageLock,
}

impl SecretBuffer {
    /// Copy `data` into a new secret allocation and `mlock` it.
    ///
    /// The caller should zeroize its own copy of `data` afterwards.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::SecureMemory` if allocation fails.
    pub fn new(data: &[u8]) -> Result<Self, CryptoError> {
        let inner: SecretSlice<u8> = data.to_vec().into();
        let exposed = inner.expose_secret();
        let lock = PageLock::acquire(exposed.as_ptr(), exposed.len());
        Ok(Self { inner, lock })
    }

    /// Expose the underlying bytes for a cryptographic operation.
    ///
    /// Keep exposure minimal: use the slice within a single expression
    /// rather than binding it to a long-lived variable.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    /// Number of bytes in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.expose_secret().len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the underlying pages are `mlock`'d.
    #[must_use]
    pub const fn is_mlocked(&self) -> bool {
        self.lock.locked
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

impl fmt::Display for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

#[cfg(unix)]
mod platform {
    pub(super) fn try_mlock(ptr: *const u8, len: usize) -> bool {
        if len == 0 {
            return true;
        }
        // SAFETY: mlock accepts any valid pointer/length pair; an invalid
        // range yields ENOMEM, which we report as "not locked".
        unsafe { libc::mlock(ptr.cast(), len) == 0 }
    }

    pub(super) fn try_munlock(ptr: *const u8, len: usize) {
        if len == 0 {
            return;
        }
        // SAFETY: munlock failure is non-critical.
        unsafe {
            libc::munlock(ptr.cast(), len);
        }
    }
}

#[cfg(not(unix))]
mod platform {
    pub(super) fn try_mlock(_ptr: *const u8, _len: usize) -> bool {
        false
    }

    pub(super) fn try_munlock(_ptr: *const u8, _len: usize) {}
}
