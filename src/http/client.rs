//! Request executor
//!
//! Provides the HTTP client every endpoint goes through. It handles:
//! - Rate limiting shared by all clones of a client
//! - Null stripping of JSON bodies and query parameters
//! - Bearer authentication and client identification headers
//! - Normalizing JSON and PDF answers into an [`Envelope`]
//!
//! Non-2xx/3xx answers are not errors here; they come back as envelopes
//! with `success == false`. Only transport failures are `Err`.

use super::envelope::Envelope;
use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::config::ClientConfig;
use crate::decode::Cursor;
use crate::error::{Error, Result};
use crate::types::{ApiVersion, JsonObject, Method};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Content type that switches an answer to a binary envelope
const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Client identification header sent with every request
const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// API revision the path is relative to
    pub version: ApiVersion,
    /// Query parameters; null values are dropped before sending
    pub query: JsonObject,
    /// JSON body; top-level null values are dropped before sending
    pub body: Option<Value>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Target a specific API version
    #[must_use]
    pub fn version(mut self, version: ApiVersion) -> Self {
        self.version = version;
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Merge every key of a JSON object into the query parameters
    #[must_use]
    pub fn query_object(mut self, params: Value) -> Self {
        if let Value::Object(map) = params {
            self.query.extend(map);
        }
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Rate-limited HTTP client for the Escavador API
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
    rate_limiter: RateLimiter,
}

impl HttpClient {
    /// Create a client with its own rate limiter
    pub fn new(config: ClientConfig) -> Result<Self> {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(config.requests_per_minute));
        Self::with_rate_limiter(config, limiter)
    }

    /// Create a client that draws capacity from an existing limiter
    pub fn with_rate_limiter(config: ClientConfig, rate_limiter: RateLimiter) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// The configuration this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The limiter every request waits on
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Issue one request against the v2 API.
    ///
    /// `body` and `query`, when given, must be JSON objects.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        query: Option<Value>,
    ) -> Result<Envelope> {
        let mut config = RequestConfig::new();
        if let Some(query) = query {
            config = config.query_object(query);
        }
        config.body = body;
        self.request(method, path, config).await
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Envelope> {
        self.request(Method::GET, path, RequestConfig::default())
            .await
    }

    /// Make a GET request with config
    pub async fn get_with_config(&self, path: &str, config: RequestConfig) -> Result<Envelope> {
        self.request(Method::GET, path, config).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, path: &str, body: Value) -> Result<Envelope> {
        self.request(Method::POST, path, RequestConfig::new().json(body))
            .await
    }

    /// Make a POST request with config
    pub async fn post_with_config(&self, path: &str, config: RequestConfig) -> Result<Envelope> {
        self.request(Method::POST, path, config).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put(&self, path: &str, body: Value) -> Result<Envelope> {
        self.request(Method::PUT, path, RequestConfig::new().json(body))
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Envelope> {
        self.request(Method::DELETE, path, RequestConfig::default())
            .await
    }

    /// Follow a pagination cursor
    pub async fn follow(&self, cursor: &Cursor) -> Result<Envelope> {
        let (version, path) = cursor.to_request()?;
        self.request(Method::GET, &path, RequestConfig::new().version(version))
            .await
    }

    /// Make a generic request
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<Envelope> {
        let full_url = self.build_url(config.version, path);
        let timeout = config.timeout.unwrap_or_else(|| self.config.timeout());

        self.rate_limiter.wait().await;

        let mut req = self
            .client
            .request(method.into(), &full_url)
            .bearer_auth(&self.config.api_key)
            .header(REQUESTED_WITH.0, REQUESTED_WITH.1)
            .timeout(timeout);

        let pairs = query_pairs(&config.query);
        if !pairs.is_empty() {
            req = req.query(&pairs);
        }

        if let Some(body) = config.body {
            req = req.json(&drop_nulls(body));
        }

        let response = req.send().await.map_err(|e| transport_error(e, timeout))?;
        let status = response.status().as_u16();

        let is_pdf = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with(PDF_CONTENT_TYPE));

        if is_pdf {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| transport_error(e, timeout))?;
            debug!("{} {} -> {} ({} bytes)", method, full_url, status, bytes.len());
            return Ok(Envelope::binary(status, bytes));
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e, timeout))?;
        debug!("{} {} -> {}", method, full_url, status);

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                // Error pages from proxies are not JSON; keep the text for the classifier
                Err(_) if status >= 400 => Value::String(text),
                Err(e) => {
                    return Err(Error::decode(format!(
                        "invalid JSON from {full_url}: {e}"
                    )))
                }
            }
        };

        Ok(Envelope::json(status, body))
    }

    /// Build full URL from a path relative to the versioned base
    fn build_url(&self, version: ApiVersion, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{version}/{path}")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("rate_limiter", &self.rate_limiter)
            .finish_non_exhaustive()
    }
}

fn transport_error(e: reqwest::Error, timeout: Duration) -> Error {
    if e.is_timeout() {
        Error::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        Error::Transport(e)
    }
}

/// Remove top-level null values from a JSON object
pub(crate) fn drop_nulls(body: Value) -> Value {
    match body {
        Value::Object(map) => Value::Object(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        other => other,
    }
}

/// Flatten query parameters into string pairs.
///
/// Nulls are skipped, arrays become repeated `key[]` pairs and nested
/// objects are sent as their JSON text.
pub(crate) fn query_pairs(query: &JsonObject) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(query.len());
    for (key, value) in query {
        match value {
            Value::Null => {}
            Value::Array(values) => {
                let key = format!("{key}[]");
                pairs.extend(
                    values
                        .iter()
                        .filter_map(scalar_to_string)
                        .map(|v| (key.clone(), v)),
                );
            }
            other => {
                if let Some(v) = scalar_to_string(other) {
                    pairs.push((key.clone(), v));
                }
            }
        }
    }
    pairs
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
