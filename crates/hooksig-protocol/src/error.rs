//! Typed failure kinds for parsing and verification.
//!
//! All failures are synchronous and recoverable by the caller; nothing here
//! is retried internally. Comparison routines are total predicates and never
//! surface through this enum.

use thiserror::Error;

/// Parse and verification failures.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// A comma-separated chunk did not split into exactly two `=` parts.
    #[error("malformed pair `{pair}`: expected exactly one `=` separator")]
    MalformedPair {
        /// The offending chunk as encountered on the wire.
        pair: String,
    },

    /// An entry chunk did not split into exactly two `=` parts.
    #[error("malformed entry `{entry}`: expected exactly one `=` separator")]
    MalformedEntry {
        /// The offending chunk as encountered on the wire.
        entry: String,
    },

    /// An entry key was not `v` followed by a positive integer.
    #[error("invalid scheme version key `{key}`")]
    InvalidVersion {
        /// The offending key.
        key: String,
    },

    /// A parsed version has no registered scheme.
    #[error("no scheme registered for version {version}")]
    UnknownScheme {
        /// The version parsed from the wire.
        version: u32,
    },

    /// No `t=` pair was present.
    #[error("missing timestamp pair")]
    MissingTimestamp,

    /// More than one `t=` pair was present.
    #[error("duplicate timestamp pair")]
    DuplicateTimestamp,

    /// The `t=` value was not a non-zero integer.
    #[error("invalid timestamp `{value}`: expected a non-zero integer")]
    InvalidTimestamp {
        /// The offending value.
        value: String,
    },

    /// The envelope is older than the verification tolerance allows.
    #[error("signature expired: age {age_ms}ms exceeds tolerance {tolerance_ms}ms")]
    Expired {
        /// Envelope age at verification time, in milliseconds.
        age_ms: i64,
        /// Configured tolerance, in milliseconds.
        tolerance_ms: i64,
    },

    /// The envelope carries no signature entries.
    #[error("envelope carries no signature entries")]
    Unsigned,

    /// Every trusted entry failed to match the supplied secret.
    #[error("no signature entry matched the supplied secret")]
    NoValidSignature,
}

/// Result type alias for protocol operations.
pub type SignatureResult<T> = Result<T, SignatureError>;
