//! Uniform response envelope
//!
//! Every answer from the API, JSON or PDF, is normalized into an
//! [`Envelope`] before anything else looks at it. On the wire the JSON form
//! is `{"resposta": <body>, "http_status": <int>, "sucesso": <bool>}`.

use crate::decode::Cursor;
use crate::error::{Error, Result};
use bytes::Bytes;
use serde_json::{json, Value};

/// Body of an envelope
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeBody {
    /// Parsed JSON payload (`Null` for an empty body)
    Json(Value),
    /// Raw bytes of a binary (PDF) payload
    Binary(Bytes),
}

/// The `{success, status, body}` wrapper around one HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    success: bool,
    http_status: u16,
    body: EnvelopeBody,
}

impl Envelope {
    /// Wrap a JSON body; success is derived from the status
    pub fn json(http_status: u16, body: Value) -> Self {
        Self {
            success: is_success(http_status),
            http_status,
            body: EnvelopeBody::Json(body),
        }
    }

    /// Wrap a binary body; success is derived from the status alone
    pub fn binary(http_status: u16, bytes: impl Into<Bytes>) -> Self {
        Self {
            success: is_success(http_status),
            http_status,
            body: EnvelopeBody::Binary(bytes.into()),
        }
    }

    /// Whether the request succeeded (`http_status < 400`)
    pub fn success(&self) -> bool {
        self.success
    }

    /// HTTP status of the response
    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    /// The body, JSON or binary
    pub fn body(&self) -> &EnvelopeBody {
        &self.body
    }

    /// Consume the envelope, keeping the body
    pub fn into_body(self) -> EnvelopeBody {
        self.body
    }

    /// JSON body, if this is not a binary envelope
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            EnvelopeBody::Json(value) => Some(value),
            EnvelopeBody::Binary(_) => None,
        }
    }

    /// Raw bytes, if this is a binary envelope
    pub fn bytes(&self) -> Option<&Bytes> {
        match &self.body {
            EnvelopeBody::Binary(bytes) => Some(bytes),
            EnvelopeBody::Json(_) => None,
        }
    }

    /// Whether the body carries a paginated `items` array
    pub fn has_items(&self) -> bool {
        self.json_body()
            .and_then(|body| body.get("items"))
            .is_some_and(Value::is_array)
    }

    /// Items of a paginated body; empty when absent
    pub fn items(&self) -> &[Value] {
        self.json_body()
            .and_then(|body| body.get("items"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The `links.next` cursor of a paginated body; empty when absent
    pub fn next_cursor(&self) -> Cursor {
        self.json_body()
            .and_then(|body| body.get("links"))
            .and_then(|links| links.get("next"))
            .and_then(Value::as_str)
            .map(Cursor::new)
            .unwrap_or_default()
    }

    /// Render the wire form of a JSON envelope
    pub fn to_wire(&self) -> Result<Value> {
        match &self.body {
            EnvelopeBody::Json(body) => Ok(json!({
                "resposta": body,
                "http_status": self.http_status,
                "sucesso": self.success,
            })),
            EnvelopeBody::Binary(_) => Err(Error::decode(
                "binary envelopes have no JSON wire form",
            )),
        }
    }

    /// Parse the wire form of a JSON envelope
    pub fn from_wire(value: &Value) -> Result<Self> {
        let http_status = value
            .get("http_status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
            .ok_or_else(|| Error::decode("envelope without a valid 'http_status'"))?;
        let body = value.get("resposta").cloned().unwrap_or(Value::Null);

        let mut envelope = Self::json(http_status, body);
        if let Some(success) = value.get("sucesso").and_then(Value::as_bool) {
            envelope.success = success;
        }
        Ok(envelope)
    }
}

fn is_success(status: u16) -> bool {
    status < 400
}
