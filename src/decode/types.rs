//! Decoder types and traits
//!
//! Defines the [`FromJson`] trait, the opaque pagination [`Cursor`] and the
//! top-level decode entry points.

use crate::error::{Error, Result};
use crate::types::{ApiVersion, OptionStringExt};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Everything up to and including the `/api/vN/` segment of a cursor URL
static VERSION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*/api/v(\d+)/").unwrap());

static MISSING_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^missing field `([^`]+)`").unwrap());

// ============================================================================
// Cursor
// ============================================================================

/// Opaque link to the next page of a listing.
///
/// Issued by the server in `links.next` as an absolute URL and only ever
/// round-tripped; an empty cursor means there is no next page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a cursor URL as received from the server
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The absent cursor
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether there is no next page
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The raw cursor URL
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The cursor URL, or `None` when empty
    pub fn into_option(self) -> Option<String> {
        self.0.none_if_empty()
    }

    /// Split the cursor into the API version and the path relative to it.
    ///
    /// The scheme, host and `/api/vN/` prefix are stripped. URLs without
    /// that prefix keep their path and query and target the current API.
    /// Empty cursors and revisions other than v1 and v2 are errors.
    pub fn to_request(&self) -> Result<(ApiVersion, String)> {
        if self.is_empty() {
            return Err(Error::decode("cannot follow an empty cursor"));
        }

        if let Some(caps) = VERSION_PREFIX.captures(&self.0) {
            let version = match &caps[1] {
                "1" => ApiVersion::V1,
                "2" => ApiVersion::V2,
                other => {
                    return Err(Error::decode(format!(
                        "cursor targets unsupported API version v{other}: {}",
                        self.0
                    )))
                }
            };
            let path = VERSION_PREFIX.replace(&self.0, "").into_owned();
            return Ok((version, path));
        }

        match url::Url::parse(&self.0) {
            Ok(url) => {
                let mut path = url.path().trim_start_matches('/').to_string();
                if let Some(query) = url.query() {
                    path.push('?');
                    path.push_str(query);
                }
                Ok((ApiVersion::default(), path))
            }
            Err(_) => Ok((
                ApiVersion::default(),
                self.0.trim_start_matches('/').to_string(),
            )),
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Option<String>> for Cursor {
    fn from(value: Option<String>) -> Self {
        Self(value.unwrap_or_default())
    }
}

// ============================================================================
// FromJson
// ============================================================================

/// Conversion from a JSON payload into a typed entity.
///
/// Entities derive `Deserialize` for the canonical shape; this trait names
/// them in errors and hosts the adapters for older API revisions.
pub trait FromJson: DeserializeOwned {
    /// Entity name used in decode errors
    const ENTITY: &'static str;

    /// Decode the canonical (current API) shape
    fn from_json(json: &Value) -> Result<Self> {
        from_value(json, Self::ENTITY)
    }

    /// Decode the shape served by a given API revision.
    ///
    /// Entities whose older payloads differ override this with an adapter;
    /// the default decodes the canonical shape.
    fn from_json_versioned(json: &Value, version: ApiVersion) -> Result<Self> {
        let _ = version;
        Self::from_json(json)
    }
}

/// Deserialize an object, mapping serde's missing-field error to
/// [`Error::MissingField`]
pub(crate) fn from_value<T: DeserializeOwned>(json: &Value, entity: &'static str) -> Result<T> {
    expect_object(json, entity)?;
    T::deserialize(json).map_err(|e| {
        let message = e.to_string();
        match MISSING_FIELD.captures(&message) {
            Some(caps) => Error::missing_field(entity, &caps[1]),
            None => Error::decode(format!("{entity}: {message}")),
        }
    })
}

/// Decode an optional payload; `None` and JSON `null` decode to `None`
pub fn decode<T: FromJson>(json: Option<&Value>) -> Result<Option<T>> {
    decode_versioned(json, ApiVersion::default())
}

/// Decode an optional payload served by a specific API revision
pub fn decode_versioned<T: FromJson>(
    json: Option<&Value>,
    version: ApiVersion,
) -> Result<Option<T>> {
    match json {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::from_json_versioned(value, version).map(Some),
    }
}

/// Decode an optional array, skipping null and malformed entries.
///
/// Anything that is not an array decodes to an empty list.
pub fn decode_list<T: FromJson>(json: Option<&Value>, version: ApiVersion) -> Vec<T> {
    let Some(Value::Array(values)) = json else {
        return Vec::new();
    };

    values
        .iter()
        .filter(|v| !v.is_null())
        .filter_map(|v| match T::from_json_versioned(v, version) {
            Ok(entity) => Some(entity),
            Err(e) => {
                debug!("Skipping malformed {} entry: {}", T::ENTITY, e);
                None
            }
        })
        .collect()
}

/// Require a JSON object, naming the entity in the error
pub(crate) fn expect_object<'a>(
    json: &'a Value,
    entity: &'static str,
) -> Result<&'a serde_json::Map<String, Value>> {
    json.as_object().ok_or_else(|| {
        Error::decode(format!(
            "expected a JSON object for {entity}, got {}",
            value_kind(json)
        ))
    })
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
