//! Versioned webhook signature envelopes.
//!
//! This crate implements the signing, parsing, and verification engine for
//! webhook message authentication. A sender signs a raw payload with one or
//! more shared secrets under one or more versioned schemes and ships the
//! result as a single header value:
//!
//! ```text
//! t=946720800,v1=b70100cf2943bec15996e3ae9392d0dcaf21f285fa81969108185d47b292dfa2
//! ```
//!
//! A receiver parses that value back into a [`SignatureEnvelope`] and
//! verifies it against its own copy of the secret. Verification succeeds if
//! at least one scheme/secret combination matches, which is what makes
//! secret rotation (old and new secret both present) and scheme migration
//! (demote a version via [`VerifyOptions::with_untrusted_version`]) work
//! without a flag day.
//!
//! # Quick Start
//!
//! ```rust
//! use hooksig_crypto::SigningSecret;
//! use hooksig_protocol::{SchemeRegistry, SignatureEnvelope, VerifyOptions};
//!
//! let registry = SchemeRegistry::with_defaults();
//! let secret = SigningSecret::new("whsec_example");
//!
//! let envelope = SignatureEnvelope::sign(946_720_800, b"{}", &[secret.clone()], &registry);
//! let header_value = envelope.to_string();
//!
//! let parsed = SignatureEnvelope::parse(&header_value, &registry).unwrap();
//! let options = VerifyOptions::new().with_now_ms(946_720_800);
//! assert!(parsed.verify(b"{}", &secret, &options).is_ok());
//! ```
//!
//! # Modules
//!
//! - [`scheme`] - the [`SignatureScheme`] capability and built-in algorithms
//! - [`registry`] - versioned scheme lookup
//! - [`entry`] - one scheme's signature value within an envelope
//! - [`envelope`] - the full header value and the verification algorithm
//! - [`wire`] - the shared textual encoding rules
//! - [`error`] - typed failure kinds
//!
//! The crate performs no I/O and no logging; callers supply the raw payload
//! bytes exactly as transmitted and map failures to transport responses.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod entry;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod scheme;
pub mod wire;

pub use entry::SignatureEntry;
pub use envelope::{SignatureEnvelope, VerifyOptions};
pub use error::{SignatureError, SignatureResult};
pub use registry::SchemeRegistry;
pub use scheme::{HmacSha1Scheme, HmacSha256Scheme, SignatureScheme};

use std::time::Duration;

/// Default verification tolerance: the maximum accepted envelope age.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300); // 5 minutes
