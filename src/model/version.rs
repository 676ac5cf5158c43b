//! VersionToken - opaque 8-byte row version used for optimistic concurrency.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Number of bytes in a row version.
pub const TOKEN_LEN: usize = 8;

/// Opaque row version issued by the store on every successful write.
///
/// Two tokens are equal only when every byte matches. The string produced
/// by [`VersionToken::diagnostic`] is lossy and must never stand in for
/// equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VersionToken([u8; TOKEN_LEN]);

/// Errors raised while reading a token back from a client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("version token must be {TOKEN_LEN} bytes, got {0}")]
    WrongLength(usize),
    #[error("version token is not valid base64: {0}")]
    Encoding(String),
}

impl VersionToken {
    pub const fn new(bytes: [u8; TOKEN_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a token from a store-wide monotonic counter (big-endian).
    pub const fn from_counter(counter: u64) -> Self {
        Self(counter.to_be_bytes())
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, TokenError> {
        let array: [u8; TOKEN_LEN] = bytes
            .try_into()
            .map_err(|_| TokenError::WrongLength(bytes.len()))?;
        Ok(Self(array))
    }

    /// Decode the base64 form carried in a form's hidden field.
    pub fn from_base64(encoded: &str) -> Result<Self, TokenError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }

    /// Human-readable form: decimal value of every non-zero byte, in order.
    ///
    /// Zero bytes are skipped entirely, so distinct tokens can share a
    /// diagnostic string. Display only.
    pub fn diagnostic(&self) -> String {
        self.0
            .iter()
            .filter(|byte| **byte != 0)
            .map(|byte| byte.to_string())
            .collect()
    }
}

impl fmt::Debug for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionToken({:?})", self.0)
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl From<[u8; TOKEN_LEN]> for VersionToken {
    fn from(bytes: [u8; TOKEN_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for VersionToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for VersionToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_base64(&encoded).map_err(de::Error::custom)
    }
}
