//! Error types for the Escavador SDK
//!
//! Failures come in two layers. Fatal failures (transport, timeouts,
//! authentication under the default policy, malformed payloads) are the
//! crate [`Error`]. Errors the API reports about a request are plain values
//! of type [`ApiError`], carried in the inner half of [`ApiResult`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// The main error type for the Escavador SDK
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("{0}")]
    Api(ApiError),

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Missing required field '{field}' while decoding {entity}")]
    MissingField { entity: &'static str, field: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing config field error
    pub fn missing_config(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a missing field error for an entity
    pub fn missing_field(entity: &'static str, field: impl Into<String>) -> Self {
        Self::MissingField {
            entity,
            field: field.into(),
        }
    }

    /// Whether the error came from the network layer rather than the API
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Timeout { .. })
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

/// Result type alias for the Escavador SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a call the API answered: the value, or the error it reported
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

// ============================================================================
// ApiError
// ============================================================================

/// An error reported by the API in a failed envelope.
///
/// Compares equal to a `u16` holding its HTTP status and to a `&str`
/// holding its code (ignoring case), so assertions can be written as
/// `assert_eq!(err, 404)` or `assert_eq!(err, "NOT_FOUND")`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status of the failed response
    pub status_code: u16,
    /// Machine readable error code
    pub code: String,
    /// Human readable message
    pub message: String,
    /// Every other key the error body carried
    pub details: Map<String, Value>,
}

impl ApiError {
    /// Create an API error with no details
    pub fn new(status_code: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            code: code.into(),
            message: message.into(),
            details: Map::new(),
        }
    }

    /// Build an error from a failed response body.
    ///
    /// `message` falls back to the `error` key some endpoints use. The
    /// `errors` key, when present, is kept in `details` alongside any other
    /// extra keys.
    pub fn from_body(status_code: u16, body: &Value) -> Self {
        let Some(obj) = body.as_object() else {
            let message = match body {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Self::new(status_code, "", message);
        };

        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        let code = text("code").unwrap_or_default();
        let message = text("message").or_else(|| text("error")).unwrap_or_default();

        let details = obj
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "code" | "message" | "error"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            status_code,
            code,
            message,
            details,
        }
    }

    /// Whether this is an authentication failure
    pub fn is_unauthorized(&self) -> bool {
        self.status_code == 401
    }

    /// Look up a detail key
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error {} ({}): {}",
            self.code, self.status_code, self.message
        )
    }
}

impl std::error::Error for ApiError {}

impl PartialEq for ApiError {
    fn eq(&self, other: &Self) -> bool {
        self.status_code == other.status_code && self.code.eq_ignore_ascii_case(&other.code)
    }
}

impl PartialEq<u16> for ApiError {
    fn eq(&self, other: &u16) -> bool {
        self.status_code == *other
    }
}

impl PartialEq<&str> for ApiError {
    fn eq(&self, other: &&str) -> bool {
        self.code.eq_ignore_ascii_case(other)
    }
}

// ============================================================================
// Partial pagination
// ============================================================================

/// Why a pagination run stopped before reaching the requested count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A follow-up page came back failed or unreadable
    FailedPage,
    /// A follow-up page succeeded but carried no items
    EmptyPage,
    /// A follow-up request never got an answer
    Transport,
}

/// Annotation on a collection whose pagination stopped early.
///
/// Already collected items are kept; this records the status of the
/// follow-up that ended the run.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("pagination stopped early ({reason:?}, status {status})")]
pub struct PartialPaginationError {
    /// HTTP status of the follow-up (0 when it never got a response)
    pub status: u16,
    /// Whether the follow-up envelope was marked successful
    pub success: bool,
    /// Why accumulation stopped
    pub reason: StopReason,
    /// The classified error, when the follow-up failed with a JSON body
    pub error: Option<ApiError>,
    /// Failure text, when the follow-up produced no usable envelope or
    /// carried items that did not decode
    pub cause: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_config("api_key");
        assert_eq!(err.to_string(), "Missing required config field: api_key");

        let err = Error::missing_field("Tribunal", "sigla");
        assert_eq!(
            err.to_string(),
            "Missing required field 'sigla' while decoding Tribunal"
        );
    }

    #[test]
    fn test_api_error_from_body() {
        let body = json!({
            "code": "NOT_FOUND",
            "message": "Processo não encontrado",
            "errors": {"numero_cnj": ["inválido"]}
        });
        let err = ApiError::from_body(404, &body);

        assert_eq!(err.status_code, 404);
        assert_eq!(err.code, "NOT_FOUND");
        assert_eq!(err.message, "Processo não encontrado");
        assert!(err.detail("errors").is_some());
        assert!(err.detail("code").is_none());
    }

    #[test]
    fn test_api_error_falls_back_to_error_key() {
        let err = ApiError::from_body(422, &json!({"error": "Parâmetro inválido"}));
        assert_eq!(err.message, "Parâmetro inválido");
        assert_eq!(err.code, "");
    }

    #[test]
    fn test_api_error_non_object_body() {
        let err = ApiError::from_body(500, &json!("Internal error"));
        assert_eq!(err.message, "Internal error");
        assert!(err.details.is_empty());
    }

    #[test]
    fn test_api_error_comparisons() {
        let err = ApiError::new(402, "SEM_CREDITOS", "Saldo insuficiente");
        assert_eq!(err, 402u16);
        assert_eq!(err, "sem_creditos");
        assert_ne!(err, 404u16);
        assert_ne!(err, "NOT_FOUND");
        assert_eq!(err.to_string(), "Error SEM_CREDITOS (402): Saldo insuficiente");
    }

    #[test]
    fn test_is_transport() {
        assert!(Error::Timeout { timeout_ms: 10 }.is_transport());
        assert!(!Error::authentication("bad token").is_transport());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
