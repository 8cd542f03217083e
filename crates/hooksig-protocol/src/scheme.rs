//! Signature schemes.
//!
//! A scheme is a versioned signing algorithm: a pure function of
//! `(timestamp, payload, secret)`. Schemes are registered in a
//! [`SchemeRegistry`](crate::SchemeRegistry) and looked up by version when
//! parsing; adding a scheme never touches entry or envelope logic.

use hooksig_crypto::{SigningSecret, hmac_sha1_hex, hmac_sha256_hex};

/// A versioned signing algorithm.
///
/// `sign` must be deterministic: the same inputs always yield the same
/// output string. `version` is fixed for the lifetime of the instance.
pub trait SignatureScheme: Send + Sync {
    /// The scheme's wire version. Always positive.
    fn version(&self) -> u32;

    /// Compute the signature string for a payload at a timestamp.
    fn sign(&self, timestamp: i64, payload: &[u8], secret: &SigningSecret) -> String;
}

/// Build the byte sequence every built-in scheme signs:
/// `{timestamp-decimal}.{raw-payload-bytes}`.
#[must_use]
pub fn signing_message(timestamp: i64, payload: &[u8]) -> Vec<u8> {
    let timestamp = timestamp.to_string();
    let mut message = Vec::with_capacity(timestamp.len() + 1 + payload.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.push(b'.');
    message.extend_from_slice(payload);
    message
}

/// HMAC-SHA256 over `{timestamp}.{payload}`, lowercase hex.
///
/// The protocol default, registered as version 1.
#[derive(Debug, Clone, Copy)]
pub struct HmacSha256Scheme {
    version: u32,
}

impl HmacSha256Scheme {
    /// Wire version of the default registration.
    pub const DEFAULT_VERSION: u32 = 1;

    /// Create the scheme at its default version.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            version: Self::DEFAULT_VERSION,
        }
    }

    /// Create the scheme at a caller-chosen version. Must be positive.
    #[must_use]
    pub const fn with_version(version: u32) -> Self {
        Self { version }
    }
}

impl Default for HmacSha256Scheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureScheme for HmacSha256Scheme {
    fn version(&self) -> u32 {
        self.version
    }

    fn sign(&self, timestamp: i64, payload: &[u8], secret: &SigningSecret) -> String {
        hmac_sha256_hex(secret, &signing_message(timestamp, payload))
    }
}

/// HMAC-SHA1 over `{timestamp}.{payload}`, lowercase hex (legacy).
///
/// Not registered by default; callers that still interoperate with SHA-1
/// senders assign it a version and register it themselves.
#[derive(Debug, Clone, Copy)]
pub struct HmacSha1Scheme {
    version: u32,
}

impl HmacSha1Scheme {
    /// Create the scheme at a caller-chosen version. Must be positive.
    #[must_use]
    pub const fn with_version(version: u32) -> Self {
        Self { version }
    }
}

impl SignatureScheme for HmacSha1Scheme {
    fn version(&self) -> u32 {
        self.version
    }

    fn sign(&self, timestamp: i64, payload: &[u8], secret: &SigningSecret) -> String {
        hmac_sha1_hex(secret, &signing_message(timestamp, payload))
    }
}
