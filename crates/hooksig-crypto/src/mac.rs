//! HMAC computation for signature schemes.
//!
//! Digests are rendered as lowercase hex, the wire encoding every scheme in
//! the protocol uses.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

use crate::secret::SigningSecret;

/// Compute HMAC-SHA256 over `message`, hex-encoded.
#[must_use]
pub fn hmac_sha256_hex(secret: &SigningSecret, message: &[u8]) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Compute HMAC-SHA1 over `message`, hex-encoded.
#[must_use]
pub fn hmac_sha1_hex(secret: &SigningSecret, message: &[u8]) -> String {
    let mut mac =
        Hmac::<Sha1>::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_deterministic() {
        let secret = SigningSecret::new("secret");
        let a = hmac_sha256_hex(&secret, b"message");
        let b = hmac_sha256_hex(&secret, b"message");
        assert_eq!(a, b);
    }

    #[test]
    fn sha256_different_messages() {
        let secret = SigningSecret::new("secret");
        let a = hmac_sha256_hex(&secret, b"message 1");
        let b = hmac_sha256_hex(&secret, b"message 2");
        assert_ne!(a, b);
    }

    #[test]
    fn sha256_different_secrets() {
        let a = hmac_sha256_hex(&SigningSecret::new("secret 1"), b"message");
        let b = hmac_sha256_hex(&SigningSecret::new("secret 2"), b"message");
        assert_ne!(a, b);
    }

    #[test]
    fn sha256_lowercase_hex() {
        let digest = hmac_sha256_hex(&SigningSecret::new("secret"), b"message");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn sha1_digest_length() {
        let digest = hmac_sha1_hex(&SigningSecret::new("secret"), b"message");
        assert_eq!(digest.len(), 40);
    }

    #[test]
    fn golden_vector_sha256() {
        // RFC 4231 test case 2.
        let digest = hmac_sha256_hex(&SigningSecret::new("Jefe"), b"what do ya want for nothing?");
        assert_eq!(
            digest,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
