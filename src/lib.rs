#![recursion_limit = "256"]
// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Escavador SDK
//!
//! Typed async client for the Escavador legal-records API.
//!
//! ## Features
//!
//! - **Rate limited requests**: one shared limiter per client, 500 requests per minute by default
//! - **Two-level results**: transport failures are errors, API failures are values
//! - **Typed entities**: processes, movements, parties, courts and credits
//! - **Cursor pagination**: collect up to N results across pages, then resume later
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use escavador_sdk::{BuscaEnvolvido, Escavador, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Reads ESCAVADOR_API_KEY and friends
//!     let escavador = Escavador::from_env()?;
//!
//!     let busca = BuscaEnvolvido::por_nome("Maria da Silva").qtd(20);
//!     match escavador.processos().por_envolvido(&busca).await? {
//!         Ok(processos) => {
//!             for processo in &processos {
//!                 println!("{}", processo.numero_cnj);
//!             }
//!             if let Some(partial) = processos.partial_error() {
//!                 eprintln!("stopped early: {partial}");
//!             }
//!         }
//!         Err(api_error) => eprintln!("{api_error}"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Escavador                           │
//! │  processos()  envolvidos()  tribunais()  creditos()  ...    │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴──┬───────────────┬────────────┐
//! │     HTTP     │    Classify     │    Decode     │  Paginate  │
//! ├──────────────┼─────────────────┼───────────────┼────────────┤
//! │ Rate limit   │ 401 policy      │ serde derive  │ Cursor     │
//! │ Envelope     │ ApiError        │ V1 adapters   │ Tokens     │
//! │ Bearer auth  │                 │ Lenient lists │ Partial    │
//! └──────────────┴─────────────────┴───────────────┴────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// HTTP client with rate limiting
pub mod http;

/// JSON to entity decoding
pub mod decode;

/// API entities
pub mod entities;

/// Cursor pagination and result collections
pub mod pagination;

/// Endpoint wrappers
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::{BuscaEnvolvido, BuscaOab, Escavador};
pub use config::ClientConfig;
pub use decode::{Cursor, FromJson};
pub use entities::*;
pub use error::{ApiError, ApiResult, Error, PartialPaginationError, Result, StopReason};
pub use http::{Envelope, HttpClient};
pub use pagination::{Collected, ContinuationToken, PageSource, Paginator, ResultCollection};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
