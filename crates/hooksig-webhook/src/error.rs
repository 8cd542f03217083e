//! Facade error types.

use hooksig_protocol::SignatureError;

/// Errors surfaced to HTTP collaborators.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The signature header was absent from the request.
    #[error("missing signature header: {0}")]
    MissingHeader(String),

    /// Payload exceeds the configured cap.
    #[error("payload too large: {size} bytes exceeds limit of {limit}")]
    PayloadTooLarge {
        /// Actual size.
        size: usize,
        /// Maximum allowed.
        limit: usize,
    },

    /// Parse or verification failure from the protocol core.
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// Result type for facade operations.
pub type WebhookResult<T> = Result<T, WebhookError>;
