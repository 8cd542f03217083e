//! Outgoing-delivery signing.

use std::sync::Arc;

use chrono::Utc;
use hooksig_crypto::SigningSecret;
use hooksig_protocol::{SchemeRegistry, SignatureEnvelope, SignatureScheme};

/// Signs outgoing webhook payloads into header values.
///
/// Holds the sender's secrets and an explicit scheme registry. With more
/// than one secret the header carries one entry per scheme/secret pair,
/// which is how rotation windows stay verifiable on both old and new
/// secrets.
pub struct WebhookSigner {
    secrets: Vec<SigningSecret>,
    registry: SchemeRegistry,
    schemes: Option<Vec<Arc<dyn SignatureScheme>>>,
}

impl WebhookSigner {
    /// Create a signer with one secret and the default scheme registry.
    #[must_use]
    pub fn new(secret: impl Into<SigningSecret>) -> Self {
        Self {
            secrets: vec![secret.into()],
            registry: SchemeRegistry::with_defaults(),
            schemes: None,
        }
    }

    /// Add another secret (rotation window).
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<SigningSecret>) -> Self {
        self.secrets.push(secret.into());
        self
    }

    /// Replace the scheme registry.
    #[must_use]
    pub fn with_registry(mut self, registry: SchemeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sign with an explicit scheme list instead of the full registry.
    #[must_use]
    pub fn with_schemes(mut self, schemes: Vec<Arc<dyn SignatureScheme>>) -> Self {
        self.schemes = Some(schemes);
        self
    }

    /// Build the signature envelope for a payload at a timestamp.
    #[must_use]
    pub fn sign(&self, timestamp: i64, payload: &[u8]) -> SignatureEnvelope {
        match &self.schemes {
            Some(schemes) => {
                SignatureEnvelope::sign_with_schemes(timestamp, payload, &self.secrets, schemes)
            }
            None => SignatureEnvelope::sign(timestamp, payload, &self.secrets, &self.registry),
        }
    }

    /// Render the header value for a payload at a timestamp.
    #[must_use]
    pub fn header_value(&self, timestamp: i64, payload: &[u8]) -> String {
        self.sign(timestamp, payload).to_string()
    }

    /// Render the header value for a payload stamped with the current time.
    #[must_use]
    pub fn header_value_now(&self, payload: &[u8]) -> String {
        self.header_value(Utc::now().timestamp_millis(), payload)
    }
}

impl std::fmt::Debug for WebhookSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSigner")
            .field("secrets", &self.secrets.len())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
