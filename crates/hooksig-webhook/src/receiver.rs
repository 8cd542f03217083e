//! Incoming-delivery verification.

use std::collections::HashMap;
use std::time::Duration;

use hooksig_crypto::SigningSecret;
use hooksig_protocol::{DEFAULT_TOLERANCE, SchemeRegistry, SignatureEnvelope, VerifyOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{WebhookError, WebhookResult};
use crate::{DEFAULT_MAX_PAYLOAD_SIZE, SIGNATURE_HEADER};

/// Receiver configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// Maximum accepted envelope age.
    pub tolerance: Duration,

    /// Skip the age check entirely.
    #[serde(default)]
    pub ignore_tolerance: bool,

    /// Scheme versions to skip during verification.
    #[serde(default)]
    pub untrusted_versions: Vec<u32>,

    /// Maximum payload size.
    pub max_payload_size: usize,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            ignore_tolerance: false,
            untrusted_versions: Vec::new(),
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}

impl ReceiverConfig {
    /// Create a configuration with defaults.
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

    /// Mark a scheme version as untrusted.
    #[must_use]
    pub fn with_untrusted_version(mut self, version: u32) -> Self {
        self.untrusted_versions.push(version);
        self
    }

    /// Set the maximum payload size.
    #[must_use]
    pub const fn with_max_payload_size(mut self, size: usize) -> Self {
        self.max_payload_size = size;
        self
    }
}

/// Verifies incoming webhook deliveries.
pub struct WebhookReceiver {
    secret: SigningSecret,
    registry: SchemeRegistry,
    config: ReceiverConfig,
}

impl WebhookReceiver {
    /// Create a receiver with one secret and the default scheme registry.
    #[must_use]
    pub fn new(secret: impl Into<SigningSecret>) -> Self {
        Self::with_config(secret, ReceiverConfig::default())
    }

    /// Create a receiver with configuration.
    #[must_use]
    pub fn with_config(secret: impl Into<SigningSecret>, config: ReceiverConfig) -> Self {
        Self {
            secret: secret.into(),
            registry: SchemeRegistry::with_defaults(),
            config,
        }
    }

    /// Replace the scheme registry.
    #[must_use]
    pub fn with_registry(mut self, registry: SchemeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The receiver's registry handle, for registering extra schemes.
    #[must_use]
    pub const fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    /// The receiver's configuration.
    #[must_use]
    pub const fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Verify a header value against the raw payload bytes.
    ///
    /// `payload` must be the request body exactly as transmitted; any
    /// re-serialization produces different bytes and the MAC cannot match.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::PayloadTooLarge`] when the payload exceeds
    /// the configured cap, or the wrapped protocol error from parsing and
    /// verification.
    pub fn verify(&self, header_value: &str, payload: &[u8]) -> WebhookResult<()> {
        if payload.len() > self.config.max_payload_size {
            return Err(WebhookError::PayloadTooLarge {
                size: payload.len(),
                limit: self.config.max_payload_size,
            });
        }

        let envelope = SignatureEnvelope::parse(header_value, &self.registry)?;

        let mut options = VerifyOptions::new().with_tolerance(self.config.tolerance);
        options.untrusted_versions = self.config.untrusted_versions.clone();
        if self.config.ignore_tolerance {
            options = options.with_ignore_tolerance();
        }

        match envelope.verify(payload, &self.secret, &options) {
            Ok(()) => {
                debug!(
                    timestamp = envelope.timestamp(),
                    entries = envelope.entries().len(),
                    "webhook signature verified"
                );
                Ok(())
            }
            Err(err) => {
                warn!(timestamp = envelope.timestamp(), %err, "webhook signature rejected");
                Err(err.into())
            }
        }
    }

    /// Extract the signature header from a header map and verify.
    ///
    /// Header lookup is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::MissingHeader`] when the header is absent,
    /// otherwise as [`Self::verify`].
    pub fn verify_headers(
        &self,
        headers: &HashMap<String, String>,
        payload: &[u8],
    ) -> WebhookResult<()> {
        let header_value = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(SIGNATURE_HEADER))
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| WebhookError::MissingHeader(SIGNATURE_HEADER.into()))?;

        self.verify(header_value, payload)
    }
}

impl std::fmt::Debug for WebhookReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookReceiver")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::WebhookSigner;

    fn signed_header(secret: &str, payload: &[u8]) -> String {
        WebhookSigner::new(secret).header_value_now(payload)
    }

    #[test]
    fn test_verify_fresh_delivery() {
        let payload = br#"{"action": "opened", "issue": {"number": 1}}"#;
        let header = signed_header("secret", payload);

        let receiver = WebhookReceiver::new("secret");
        assert!(receiver.verify(&header, payload).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let payload = b"{}";
        let header = signed_header("secret", payload);

        let receiver = WebhookReceiver::new("other");
        assert!(receiver.verify(&header, payload).is_err());
    }

    #[test]
    fn test_verify_rejects_reencoded_payload() {
        // Same JSON document, different bytes.
        let sent: Vec<u8> = serde_json::to_vec(&serde_json::json!({"id": 123, "ok": true})).unwrap();
        let reencoded = br#"{ "id": 123, "ok": true }"#;

        let header = signed_header("secret", &sent);
        let receiver = WebhookReceiver::new("secret");
        assert!(receiver.verify(&header, &sent).is_ok());
        assert!(receiver.verify(&header, reencoded).is_err());
    }

    #[test]
    fn test_payload_size_limit() {
        let config = ReceiverConfig::new().with_max_payload_size(10);
        let receiver = WebhookReceiver::with_config("secret", config);

        let large = vec![0u8; 100];
        assert!(matches!(
            receiver.verify("t=1,v1=sig", &large),
            Err(WebhookError::PayloadTooLarge { size: 100, limit: 10 })
        ));
    }

    #[test]
    fn test_header_map_lookup_is_case_insensitive() {
        let payload = b"{}";
        let header = signed_header("secret", payload);

        let mut headers = HashMap::new();
        headers.insert("X-Hooksig-Signature".to_string(), header);

        let receiver = WebhookReceiver::new("secret");
        assert!(receiver.verify_headers(&headers, payload).is_ok());
    }

    #[test]
    fn test_missing_header() {
        let receiver = WebhookReceiver::new("secret");
        let headers = HashMap::new();
        assert!(matches!(
            receiver.verify_headers(&headers, b"{}"),
            Err(WebhookError::MissingHeader(_))
        ));
    }

    #[test]
    fn test_untrusted_version_from_config() {
        let payload = b"{}";
        let header = signed_header("secret", payload);

        let config = ReceiverConfig::new().with_untrusted_version(1);
        let receiver = WebhookReceiver::with_config("secret", config);
        assert!(matches!(
            receiver.verify(&header, payload),
            Err(WebhookError::Signature(
                hooksig_protocol::SignatureError::NoValidSignature
            ))
        ));
    }

    #[test]
    fn test_config_roundtrips_through_serde() {
        let config = ReceiverConfig::new()
            .with_tolerance(Duration::from_secs(60))
            .with_untrusted_version(2);
        let json = serde_json::to_string(&config).unwrap();
        let back: ReceiverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tolerance, Duration::from_secs(60));
        assert_eq!(back.untrusted_versions, vec![2]);
    }
}
