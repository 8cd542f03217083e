//! Shared-secret handling.
//!
//! Secret bytes are zeroized on drop and never appear in `Debug` output or
//! error messages.

use zeroize::ZeroizeOnDrop;

/// A shared signing secret.
///
/// Wraps the raw secret bytes handed out by the webhook provider. HMAC
/// accepts keys of any length, so no shape is imposed on the bytes.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SigningSecret {
    bytes: Vec<u8>,
}

impl SigningSecret {
    /// Create a secret from raw bytes or a string.
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: secret.as_ref().to_vec(),
        }
    }

    /// Get the secret bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for SigningSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for SigningSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSecret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_from_str() {
        let secret = SigningSecret::from("du-TY1GUFGk");
        assert_eq!(secret.as_bytes(), b"du-TY1GUFGk");
    }

    #[test]
    fn debug_redacts_bytes() {
        let secret = SigningSecret::new("super-secret");
        let rendered = format!("{secret:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("super-secret"));
    }
}
