//! HTTP layer
//!
//! Issues rate-limited requests against the API and normalizes every answer
//! into an [`Envelope`].
//!
//! # Features
//!
//! - **Rate Limiting**: At most N calls per minute, shared by every clone of a client
//! - **Envelopes**: JSON and PDF answers behind one `{success, status, body}` shape
//! - **Classification**: Failed envelopes become [`crate::ApiError`] values

mod classify;
mod client;
mod envelope;
mod rate_limit;

pub use classify::classify;
pub use client::{HttpClient, RequestConfig};
pub use envelope::{Envelope, EnvelopeBody};
pub use rate_limit::{RateLimiter, RateLimiterConfig, DEFAULT_REQUESTS_PER_MINUTE};
