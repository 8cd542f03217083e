//! Signature entries.
//!
//! An entry pairs one scheme with one signature value, either freshly
//! computed or parsed from untrusted wire text.

use std::sync::Arc;

use hooksig_crypto::{SigningSecret, constant_time_eq};

use crate::error::{SignatureError, SignatureResult};
use crate::registry::SchemeRegistry;
use crate::scheme::SignatureScheme;
use crate::wire;

/// One scheme's signature value within an envelope.
#[derive(Clone)]
pub struct SignatureEntry {
    scheme: Arc<dyn SignatureScheme>,
    value: String,
}

impl SignatureEntry {
    /// Compute a fresh entry by signing `payload` at `timestamp`.
    #[must_use]
    pub fn sign(
        scheme: Arc<dyn SignatureScheme>,
        timestamp: i64,
        payload: &[u8],
        secret: &SigningSecret,
    ) -> Self {
        let value = scheme.sign(timestamp, payload, secret);
        Self { scheme, value }
    }

    /// Parse an entry from one `v{version}={signature}` chunk.
    ///
    /// The signature text is kept as-is; its shape is the scheme's own
    /// concern and is never validated here.
    ///
    /// # Errors
    ///
    /// - [`SignatureError::MalformedEntry`] if the chunk does not split into
    ///   exactly two `=` parts
    /// - [`SignatureError::InvalidVersion`] if the key is not `v` followed
    ///   by a positive integer
    /// - [`SignatureError::UnknownScheme`] if no scheme is registered under
    ///   the parsed version
    pub fn parse(chunk: &str, registry: &SchemeRegistry) -> SignatureResult<Self> {
        let (key, value) = wire::split_pair(chunk).ok_or_else(|| SignatureError::MalformedEntry {
            entry: chunk.to_string(),
        })?;
        let version = wire::parse_version_key(key).ok_or_else(|| SignatureError::InvalidVersion {
            key: key.to_string(),
        })?;
        let scheme = registry
            .find(version)
            .ok_or(SignatureError::UnknownScheme { version })?;
        Ok(Self {
            scheme,
            value: value.to_string(),
        })
    }

    /// The entry's scheme version.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.scheme.version()
    }

    /// The signature value as carried on the wire.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Recompute this entry from fresh inputs and compare timing-safely.
    ///
    /// A total predicate: mismatches of any kind, including signature
    /// values of the wrong length, return `false` rather than an error.
    #[must_use]
    pub fn verify(&self, payload: &[u8], secret: &SigningSecret, timestamp: i64) -> bool {
        let expected = Self::sign(Arc::clone(&self.scheme), timestamp, payload, secret);
        self.constant_time_eq(&expected)
    }

    /// Compare signature values in constant time.
    ///
    /// Length mismatches short-circuit to `false`, which leaks only gross
    /// length differences (see `hooksig_crypto::constant_time_eq`).
    #[must_use]
    pub fn constant_time_eq(&self, other: &Self) -> bool {
        constant_time_eq(self.value.as_bytes(), other.value.as_bytes())
    }
}

impl std::fmt::Display for SignatureEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            wire::VERSION_PREFIX,
            self.scheme.version(),
            wire::KEY_VALUE_SEPARATOR,
            self.value
        )
    }
}

impl std::fmt::Debug for SignatureEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureEntry")
            .field("version", &self.scheme.version())
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::HmacSha256Scheme;

    fn registry() -> SchemeRegistry {
        SchemeRegistry::with_defaults()
    }

    #[test]
    fn sign_then_render() {
        let secret = SigningSecret::new("du-TY1GUFGk");
        let entry = SignatureEntry::sign(
            Arc::new(HmacSha256Scheme::new()),
            946_720_800,
            b"it is wednesday my dudes",
            &secret,
        );
        assert_eq!(
            entry.to_string(),
            "v1=b70100cf2943bec15996e3ae9392d0dcaf21f285fa81969108185d47b292dfa2"
        );
    }

    #[test]
    fn parse_keeps_value_unvalidated() {
        let entry = SignatureEntry::parse("v1=not-even-hex", &registry()).unwrap();
        assert_eq!(entry.version(), 1);
        assert_eq!(entry.value(), "not-even-hex");
    }

    #[test]
    fn parse_rejects_malformed_chunks() {
        let registry = registry();
        assert!(matches!(
            SignatureEntry::parse("v1", &registry),
            Err(SignatureError::MalformedEntry { .. })
        ));
        assert!(matches!(
            SignatureEntry::parse("v1=a=b", &registry),
            Err(SignatureError::MalformedEntry { .. })
        ));
    }

    #[test]
    fn parse_rejects_bad_version_keys() {
        let registry = registry();
        for chunk in ["x1=sig", "v=sig", "v0=sig", "vv=sig"] {
            assert!(matches!(
                SignatureEntry::parse(chunk, &registry),
                Err(SignatureError::InvalidVersion { .. })
            ));
        }
    }

    #[test]
    fn parse_rejects_unknown_version() {
        assert!(matches!(
            SignatureEntry::parse("v999=abc", &registry()),
            Err(SignatureError::UnknownScheme { version: 999 })
        ));
    }

    #[test]
    fn verify_roundtrip() {
        let secret = SigningSecret::new("secret");
        let entry =
            SignatureEntry::sign(Arc::new(HmacSha256Scheme::new()), 123, b"payload", &secret);

        assert!(entry.verify(b"payload", &secret, 123));
        assert!(!entry.verify(b"tampered", &secret, 123));
        assert!(!entry.verify(b"payload", &SigningSecret::new("other"), 123));
        assert!(!entry.verify(b"payload", &secret, 124));
    }

    #[test]
    fn verify_is_total_on_wrong_length_values() {
        let entry = SignatureEntry::parse("v1=short", &registry()).unwrap();
        assert!(!entry.verify(b"payload", &SigningSecret::new("secret"), 123));
    }
}
