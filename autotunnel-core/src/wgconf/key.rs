//! Curve25519 key encoding used by tunnel configs.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STD;
use zeroize::Zeroize;

use crate::error::ConfigFormatError;

/// Length of a raw key in bytes
pub const KEY_LEN: usize = 32;

/// A 32-byte key in its wg-quick base64 form.
///
/// Key material is wiped when the value is dropped.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    /// Wraps raw key bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Decodes a base64 key, naming `attribute` in the error
    pub fn from_base64(value: &str, attribute: &str) -> Result<Self, ConfigFormatError> {
        let decoded = BASE64_STD
            .decode(value.trim().as_bytes())
            .map_err(|_| ConfigFormatError::new(format!("invalid base64 key for {attribute}")))?;
        if decoded.len() != KEY_LEN {
            return Err(ConfigFormatError::new(format!(
                "key for {attribute} must be {KEY_LEN} bytes, got {}",
                decoded.len()
            )));
        }
        let mut out = [0u8; KEY_LEN];
        out.copy_from_slice(&decoded);
        Ok(Self(out))
    }

    /// Returns the base64 text form
    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64_STD.encode(self.0)
    }

    /// Returns the raw bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.to_base64())
    }
}

/// An interface private key. `Debug` never prints the material.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(Key);

impl PrivateKey {
    /// Decodes a base64 private key
    pub fn from_base64(value: &str) -> Result<Self, ConfigFormatError> {
        Key::from_base64(value, "PrivateKey").map(Self)
    }

    /// Returns the base64 text form
    #[must_use]
    pub fn to_base64(&self) -> String {
        self.0.to_base64()
    }

    /// Returns the wrapped key
    #[must_use]
    pub const fn key(&self) -> &Key {
        &self.0
    }
}

impl From<Key> for PrivateKey {
    fn from(key: Key) -> Self {
        Self(key)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}
