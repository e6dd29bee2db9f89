//! `deserialize_with` helpers for API payloads
//!
//! Entities derive `Deserialize`. These helpers cover the places where the
//! API is looser than a plain derive: lists with broken entries, nested
//! objects full of nulls, keys that must be present but may be null, and
//! amounts sent as strings.

use super::types::{decode_list, value_kind, FromJson};
use crate::types::ApiVersion;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Key that must be present but may be null.
///
/// Used without `#[serde(default)]`, so an absent key is a missing field.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Null decodes to the type's default
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// List of entities, skipping null and malformed entries.
///
/// Anything that is not an array decodes to an empty list.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromJson,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(decode_list(value.as_ref(), ApiVersion::default()))
}

/// Nested entity that decodes to `None` when malformed
pub fn entity<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromJson,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match T::from_json(&value) {
        Ok(entity) => Ok(Some(entity)),
        Err(e) => {
            debug!("Ignoring malformed {}: {}", T::ENTITY, e);
            Ok(None)
        }
    }
}

/// A number, or a string holding one
pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| D::Error::custom(format!("expected a number, got {}", value_kind(&value))))
}
