//! Custom serde helpers for venue wire formats.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Deserializes a closed-set string token through the type's `FromStr`.
///
/// Anything that is not a JSON string, or a string the type does not
/// recognize, is a hard decode failure.
pub fn from_token<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let token = String::deserialize(deserializer)?;
    T::from_str(&token).map_err(D::Error::custom)
}

/// `skip_serializing_if` predicate for `omitempty`-style string fields.
pub fn is_empty_str<T: AsRef<str>>(value: &T) -> bool {
    value.as_ref().is_empty()
}

/// `skip_serializing_if` predicate for `omitempty`-style flags.
pub fn is_false(value: &bool) -> bool {
    !*value
}

/// Like [`from_token`] for optional fields: a missing field, `null` or an
/// empty string all decode to `None`.
pub fn optional_token<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(token) if !token.is_empty() => T::from_str(&token).map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// Decodes `null` as `T::default()`. The venue sends empty lists as `null`.
///
/// Pair with `#[serde(default)]` so a missing field decodes the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
