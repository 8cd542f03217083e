//! Timing-safe comparison.

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time.
///
/// Returns `false` when the lengths differ. The early length check leaks
/// gross length differences, a known minor timing signal; fixed-format hex
/// digests of a known scheme are always the same length, so it does not
/// arise in practice.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_slices() {
        assert!(constant_time_eq(b"hello", b"hello"));
    }

    #[test]
    fn unequal_slices() {
        assert!(!constant_time_eq(b"hello", b"world"));
    }

    #[test]
    fn length_mismatch_is_false() {
        assert!(!constant_time_eq(b"hello", b"helloworld"));
        assert!(!constant_time_eq(b"", b"x"));
    }

    #[test]
    fn empty_slices_equal() {
        assert!(constant_time_eq(b"", b""));
    }
}
