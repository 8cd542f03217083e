//! Crypto primitives for the hooksig webhook signature protocol.
//!
//! This crate provides the building blocks the protocol core signs and
//! verifies with:
//!
//! - [`secret`] - shared-secret handling with zeroize semantics
//! - [`mac`] - HMAC computation rendered as lowercase hex
//! - [`compare`] - timing-safe byte comparison
//!
//! # Example: Signing and Comparing
//!
//! ```rust
//! use hooksig_crypto::{SigningSecret, constant_time_eq, hmac_sha256_hex};
//!
//! let secret = SigningSecret::new("whsec_example");
//! let a = hmac_sha256_hex(&secret, b"946720800.{}");
//! let b = hmac_sha256_hex(&secret, b"946720800.{}");
//!
//! assert!(constant_time_eq(a.as_bytes(), b.as_bytes()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod compare;
pub mod mac;
pub mod secret;

pub use compare::constant_time_eq;
pub use mac::{hmac_sha1_hex, hmac_sha256_hex};
pub use secret::SigningSecret;
