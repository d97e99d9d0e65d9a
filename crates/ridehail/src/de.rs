//! Deserialization helpers for service payloads.

use serde::{Deserialize, Deserializer};

/// Decode an explicit `null` the same way as an absent field.
///
/// Use together with `#[serde(default)]` so both cases yield `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
