//! Signature envelopes.
//!
//! The envelope is the value exchanged on the wire: a timestamp plus an
//! ordered list of signature entries, one per scheme/secret combination
//! used at signing time. It owns serialization, parsing, and the
//! verification algorithm.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use hooksig_crypto::{SigningSecret, constant_time_eq};

use crate::DEFAULT_TOLERANCE;
use crate::entry::SignatureEntry;
use crate::error::{SignatureError, SignatureResult};
use crate::registry::SchemeRegistry;
use crate::scheme::SignatureScheme;
use crate::wire;

/// Options for [`SignatureEnvelope::verify`].
#[derive(Clone, Debug)]
pub struct VerifyOptions {
    /// Maximum accepted envelope age.
    pub tolerance: Duration,

    /// Skip the age check entirely.
    pub ignore_tolerance: bool,

    /// Clock override in milliseconds; wall clock when `None`.
    pub now_ms: Option<i64>,

    /// Scheme versions whose entries are skipped without comparison.
    pub untrusted_versions: Vec<u32>,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            ignore_tolerance: false,
            now_ms: None,
            untrusted_versions: Vec::new(),
        }
    }
}

impl VerifyOptions {
    /// Create options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum accepted envelope age.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Skip the age check entirely.
    #[must_use]
    pub const fn with_ignore_tolerance(mut self) -> Self {
        self.ignore_tolerance = true;
        self
    }

    /// Override the verification clock, in milliseconds.
    #[must_use]
    pub const fn with_now_ms(mut self, now_ms: i64) -> Self {
        self.now_ms = Some(now_ms);
        self
    }

    /// Mark a scheme version as untrusted.
    ///
    /// Its entries are skipped during verification without being removed
    /// from the registry, which keeps parsing working while a version is
    /// being demoted.
    #[must_use]
    pub fn with_untrusted_version(mut self, version: u32) -> Self {
        self.untrusted_versions.push(version);
        self
    }
}

/// The full signature header value: a timestamp plus signature entries.
#[derive(Clone, Debug)]
pub struct SignatureEnvelope {
    timestamp: i64,
    entries: Vec<SignatureEntry>,
}

impl SignatureEnvelope {
    /// Sign `payload` with every registered scheme and every secret.
    ///
    /// Entries are the Cartesian product in outer-scheme (registration
    /// order), inner-secret (argument order) order. Empty `secrets` or an
    /// empty registry yield an envelope with zero entries; that envelope
    /// fails verification later with [`SignatureError::Unsigned`] rather
    /// than failing here.
    #[must_use]
    pub fn sign(
        timestamp: i64,
        payload: &[u8],
        secrets: &[SigningSecret],
        registry: &SchemeRegistry,
    ) -> Self {
        Self::sign_with_schemes(timestamp, payload, secrets, &registry.snapshot())
    }

    /// Sign `payload` with an explicit scheme list instead of a registry.
    #[must_use]
    pub fn sign_with_schemes(
        timestamp: i64,
        payload: &[u8],
        secrets: &[SigningSecret],
        schemes: &[Arc<dyn SignatureScheme>],
    ) -> Self {
        let mut entries = Vec::with_capacity(schemes.len() * secrets.len());
        for scheme in schemes {
            for secret in secrets {
                entries.push(SignatureEntry::sign(
                    Arc::clone(scheme),
                    timestamp,
                    payload,
                    secret,
                ));
            }
        }
        Self { timestamp, entries }
    }

    /// Parse a header value into an envelope.
    ///
    /// The value is a comma-separated list of `key=value` pairs: exactly
    /// one `t` pair, in any position, plus entry pairs in encounter order.
    ///
    /// # Errors
    ///
    /// - [`SignatureError::MalformedPair`] if a chunk does not split into
    ///   exactly two `=` parts
    /// - [`SignatureError::DuplicateTimestamp`] on a second `t` pair
    /// - [`SignatureError::InvalidTimestamp`] if the `t` value is not a
    ///   non-zero integer
    /// - [`SignatureError::MissingTimestamp`] if no `t` pair is present
    /// - entry-level errors from [`SignatureEntry::parse`]
    pub fn parse(header_value: &str, registry: &SchemeRegistry) -> SignatureResult<Self> {
        let mut timestamp = None;
        let mut entries = Vec::new();

        for chunk in header_value.split(wire::PAIR_SEPARATOR) {
            let (key, value) =
                wire::split_pair(chunk).ok_or_else(|| SignatureError::MalformedPair {
                    pair: chunk.to_string(),
                })?;

            if key == wire::TIMESTAMP_KEY {
                if timestamp.is_some() {
                    return Err(SignatureError::DuplicateTimestamp);
                }
                timestamp = Some(wire::parse_timestamp(value).ok_or_else(|| {
                    SignatureError::InvalidTimestamp {
                        value: value.to_string(),
                    }
                })?);
            } else {
                entries.push(SignatureEntry::parse(chunk, registry)?);
            }
        }

        let timestamp = timestamp.ok_or(SignatureError::MissingTimestamp)?;
        Ok(Self { timestamp, entries })
    }

    /// The envelope's timestamp, in the sender's clock unit (milliseconds).
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The signature entries in stored order.
    #[must_use]
    pub fn entries(&self) -> &[SignatureEntry] {
        &self.entries
    }

    /// Verify the envelope against a payload and one secret.
    ///
    /// Succeeds as soon as any trusted entry matches; which one matched is
    /// deliberately not reported, so that any of several valid secrets or
    /// schemes authorizes the payload. Entries whose version appears in
    /// [`VerifyOptions::untrusted_versions`] are skipped without aborting
    /// the scan.
    ///
    /// The age check bounds staleness only: a future-dated timestamp
    /// (negative age) passes. Replay bounding is ambiguous about forward
    /// clock skew and the original protocol does not reject it either.
    ///
    /// # Errors
    ///
    /// - [`SignatureError::Expired`] when `age > tolerance` and the
    ///   tolerance is not ignored (equality passes)
    /// - [`SignatureError::Unsigned`] when the envelope has zero entries
    /// - [`SignatureError::NoValidSignature`] when no trusted entry matched
    pub fn verify(
        &self,
        payload: &[u8],
        secret: &SigningSecret,
        options: &VerifyOptions,
    ) -> SignatureResult<()> {
        if !options.ignore_tolerance {
            let now_ms = options
                .now_ms
                .unwrap_or_else(|| Utc::now().timestamp_millis());
            let age_ms = now_ms - self.timestamp;
            let tolerance_ms = i64::try_from(options.tolerance.as_millis()).unwrap_or(i64::MAX);
            if age_ms > tolerance_ms {
                return Err(SignatureError::Expired {
                    age_ms,
                    tolerance_ms,
                });
            }
        }

        if self.entries.is_empty() {
            return Err(SignatureError::Unsigned);
        }

        for entry in &self.entries {
            if options.untrusted_versions.contains(&entry.version()) {
                continue;
            }
            if entry.verify(payload, secret, self.timestamp) {
                return Ok(());
            }
        }

        Err(SignatureError::NoValidSignature)
    }

    /// Compare two envelopes' rendered texts in constant time.
    ///
    /// Same length short-circuit as entry comparison.
    #[must_use]
    pub fn constant_time_eq(&self, other: &Self) -> bool {
        constant_time_eq(self.to_string().as_bytes(), other.to_string().as_bytes())
    }
}

impl std::fmt::Display for SignatureEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            wire::TIMESTAMP_KEY,
            wire::KEY_VALUE_SEPARATOR,
            self.timestamp
        )?;
        for entry in &self.entries {
            write!(f, "{}{entry}", wire::PAIR_SEPARATOR)?;
        }
        Ok(())
    }
}
