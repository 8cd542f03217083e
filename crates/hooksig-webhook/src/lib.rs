//! Webhook signing and receiving facade.
//!
//! The protocol core in `hooksig-protocol` works on raw strings and bytes;
//! this crate is the thin layer HTTP collaborators actually call:
//!
//! - **Sending**: [`WebhookSigner`] turns `(timestamp, payload)` into the
//!   header value to attach to a delivery.
//! - **Receiving**: [`WebhookReceiver`] pulls the header out of a header
//!   map, enforces a payload cap, and runs verification.
//!
//! # Quick Start
//!
//! ```rust
//! use hooksig_webhook::{ReceiverConfig, WebhookReceiver, WebhookSigner};
//!
//! let signer = WebhookSigner::new("whsec_example");
//! let header_value = signer.header_value(946_720_800, b"{\"id\":123}");
//!
//! // The fixed timestamp above is long past any tolerance window.
//! let config = ReceiverConfig::new().with_ignore_tolerance();
//! let receiver = WebhookReceiver::with_config("whsec_example", config);
//! receiver.verify(&header_value, b"{\"id\":123}").unwrap();
//! ```
//!
//! Callers must hand over the raw request body bytes exactly as
//! transmitted. Re-serializing the payload (for example decoding and
//! re-encoding JSON) produces different bytes and breaks the MAC.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod receiver;
mod signer;

pub use error::{WebhookError, WebhookResult};
pub use receiver::{ReceiverConfig, WebhookReceiver};
pub use signer::WebhookSigner;

/// Default header carrying the signature envelope.
pub const SIGNATURE_HEADER: &str = "x-hooksig-signature";

/// Default maximum payload size accepted by a receiver.
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 5 * 1024 * 1024; // 5MB
