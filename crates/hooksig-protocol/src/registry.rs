//! Versioned scheme registry.
//!
//! Holds the set of schemes a signer or verifier recognizes. There is no
//! process-global registry: callers construct one explicitly (usually via
//! [`SchemeRegistry::with_defaults`]) and hand it to signing and parsing.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::scheme::{HmacSha256Scheme, SignatureScheme};

/// Registry of signature schemes, keyed by version.
///
/// At most one scheme per version; the first registration for a version
/// wins. Iteration order is registration order, which is what drives the
/// entry order of envelopes signed against the full registry.
///
/// Cloning yields a handle to the same underlying store. Reads and writes
/// take a lock, so concurrent verification and mutation observe either the
/// old or the new contents, never a torn value.
#[derive(Clone, Default)]
pub struct SchemeRegistry {
    schemes: Arc<RwLock<Vec<Arc<dyn SignatureScheme>>>>,
}

impl SchemeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in default scheme (v1).
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(HmacSha256Scheme::new()));
        registry
    }

    /// Register a scheme unless its version is already taken.
    pub fn register(&self, scheme: Arc<dyn SignatureScheme>) {
        let mut schemes = self.schemes.write();
        if schemes.iter().any(|s| s.version() == scheme.version()) {
            return;
        }
        schemes.push(scheme);
    }

    /// Remove every scheme registered under `version`.
    pub fn unregister(&self, version: u32) {
        self.schemes.write().retain(|s| s.version() != version);
    }

    /// Look up the scheme registered under `version`.
    ///
    /// Absence is a valid outcome, not an error.
    #[must_use]
    pub fn find(&self, version: u32) -> Option<Arc<dyn SignatureScheme>> {
        self.schemes
            .read()
            .iter()
            .find(|s| s.version() == version)
            .cloned()
    }

    /// Snapshot the registered schemes in registration order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<dyn SignatureScheme>> {
        self.schemes.read().clone()
    }

    /// Number of registered schemes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemes.read().len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.read().is_empty()
    }
}

impl std::fmt::Debug for SchemeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let versions: Vec<u32> = self.schemes.read().iter().map(|s| s.version()).collect();
        f.debug_struct("SchemeRegistry")
            .field("versions", &versions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::HmacSha1Scheme;

    #[test]
    fn defaults_register_v1() {
        let registry = SchemeRegistry::with_defaults();
        assert_eq!(registry.len(), 1);
        assert!(registry.find(1).is_some());
        assert!(registry.find(2).is_none());
    }

    #[test]
    fn register_is_first_wins() {
        let registry = SchemeRegistry::new();
        registry.register(Arc::new(HmacSha256Scheme::with_version(3)));
        registry.register(Arc::new(HmacSha1Scheme::with_version(3)));

        assert_eq!(registry.len(), 1);
        let secret = hooksig_crypto::SigningSecret::new("s");
        let found = registry.find(3).unwrap();
        // SHA-256 digests render as 64 hex chars; SHA-1 would be 40.
        assert_eq!(found.sign(1, b"p", &secret).len(), 64);
    }

    #[test]
    fn unregister_removes_all_matches() {
        let registry = SchemeRegistry::with_defaults();
        registry.unregister(1);
        assert!(registry.is_empty());
        assert!(registry.find(1).is_none());

        // Unregistering an absent version is a no-op.
        registry.unregister(99);
    }

    #[test]
    fn snapshot_preserves_registration_order() {
        let registry = SchemeRegistry::new();
        registry.register(Arc::new(HmacSha256Scheme::with_version(2)));
        registry.register(Arc::new(HmacSha256Scheme::with_version(1)));
        registry.register(Arc::new(HmacSha1Scheme::with_version(5)));

        let versions: Vec<u32> = registry.snapshot().iter().map(|s| s.version()).collect();
        assert_eq!(versions, vec![2, 1, 5]);
    }

    #[test]
    fn clones_share_the_store() {
        let registry = SchemeRegistry::new();
        let handle = registry.clone();
        handle.register(Arc::new(HmacSha256Scheme::new()));
        assert!(registry.find(1).is_some());
    }
}
