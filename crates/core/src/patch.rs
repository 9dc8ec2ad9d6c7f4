//! Helpers for partial-update payloads.
//!
//! Patch structs use `Option<Option<T>>` for clearable fields:
//! absent key -> `None` (leave untouched), `null` -> `Some(None)` (clear),
//! value -> `Some(Some(v))` (set).

use serde::{Deserialize, Deserializer};

/// `deserialize_with` target that maps a present key to `Some(..)`.
///
/// Pair with `#[serde(default)]` so an absent key stays `None`.
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Apply a clearable-field patch value.
pub fn apply_clearable<T>(target: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(value) = patch {
        *target = value;
    }
}
