//! Common types used throughout the Escavador SDK
//!
//! Shared type aliases, HTTP verbs, API versions and the small enums
//! endpoint methods pass as filters.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

// ============================================================================
// API Version
// ============================================================================

/// Revision of the remote API a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    #[default]
    V2,
}

impl ApiVersion {
    /// Path segment for this version (`v1`, `v2`)
    pub fn as_segment(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_segment())
    }
}

// ============================================================================
// Auth Failure Policy
// ============================================================================

/// What to do when the API answers 401
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFailurePolicy {
    /// Fail the whole call with [`crate::Error::Authentication`]
    #[default]
    Raise,
    /// Return the 401 as an ordinary [`crate::ApiError`] value
    ReturnValue,
}

// ============================================================================
// Search Ordering
// ============================================================================

/// Sort direction for process searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordem {
    Asc,
    Desc,
}

impl Ordem {
    pub fn as_str(self) -> &'static str {
        match self {
            Ordem::Asc => "asc",
            Ordem::Desc => "desc",
        }
    }
}

/// Sort criterion for process searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterioOrdenacao {
    /// Date of the latest movement
    #[serde(rename = "data_ultima_movimentacao")]
    UltimaMovimentacao,
    /// Date the process started
    #[serde(rename = "data_inicio")]
    Inicio,
}

impl CriterioOrdenacao {
    pub fn as_str(self) -> &'static str {
        match self {
            CriterioOrdenacao::UltimaMovimentacao => "data_ultima_movimentacao",
            CriterioOrdenacao::Inicio => "data_inicio",
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
