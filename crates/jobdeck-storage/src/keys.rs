//! Object key generation.
//!
//! Keys have the form `<prefix>-<n>-<identifier>` with `n` in 0..90000.
//! The suffix space is small and collisions are accepted: uploads upsert,
//! so a colliding key overwrites the earlier object.

use std::time::SystemTime;

/// Exclusive upper bound of the random key suffix.
pub const KEY_SUFFIX_SPACE: u32 = 90_000;

/// Clock-derived pseudo-random suffix; good enough for key spreading
/// without pulling in an RNG.
pub fn random_suffix() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    nanos % KEY_SUFFIX_SPACE
}

/// Key with an explicit suffix; used by callers that inject their own.
pub fn format_object_key(prefix: &str, suffix: u32, identifier: &str) -> String {
    format!("{}-{}-{}", prefix, suffix, identifier)
}

/// Key with a fresh random suffix.
pub fn object_key(prefix: &str, identifier: &str) -> String {
    format_object_key(prefix, random_suffix(), identifier)
}
