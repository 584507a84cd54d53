//! Serde helpers for the flat JSON records.

use serde::{Deserialize, Deserializer};

/// Deserializes a nullable column that must still be present in the body.
///
/// A plain `Option<T>` field silently becomes `None` when its key is missing.
/// Routing the field through `deserialize_with` makes serde report a
/// "missing field" error instead, while an explicit `null` is still accepted.
pub fn required<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}
