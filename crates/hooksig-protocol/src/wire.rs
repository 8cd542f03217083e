//! Wire grammar shared by envelope and entry parsing.
//!
//! A header value is a comma-separated list of `key=value` pairs: exactly
//! one `t={timestamp}` pair plus any number of `v{version}={signature}`
//! pairs, in any order. These rules live here and nowhere else.

/// Separator between pairs.
pub const PAIR_SEPARATOR: char = ',';

/// Separator between a pair's key and value.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Key of the timestamp pair.
pub const TIMESTAMP_KEY: &str = "t";

/// Prefix of every scheme-version key.
pub const VERSION_PREFIX: char = 'v';

/// Split a chunk into its key and value.
///
/// The split must yield exactly two parts; a chunk with no `=` or with more
/// than one is not a pair. Empty keys and values survive the split, the
/// caller decides what to make of them.
#[must_use]
pub fn split_pair(chunk: &str) -> Option<(&str, &str)> {
    let mut parts = chunk.split(KEY_VALUE_SEPARATOR);
    let key = parts.next()?;
    let value = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((key, value))
}

/// Parse a `v{version}` key into its version number.
///
/// Returns `None` unless the key is `v` followed by a positive integer.
#[must_use]
pub fn parse_version_key(key: &str) -> Option<u32> {
    let version = key.strip_prefix(VERSION_PREFIX)?.parse::<u32>().ok()?;
    if version == 0 {
        return None;
    }
    Some(version)
}

/// Parse a timestamp value.
///
/// Any non-zero integer is accepted at the grammar level; strict positivity
/// is a property of signing-side inputs, not of the wire.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let timestamp = value.parse::<i64>().ok()?;
    if timestamp == 0 {
        return None;
    }
    Some(timestamp)
}
