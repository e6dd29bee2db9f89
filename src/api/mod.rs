//! Endpoint wrappers
//!
//! Thin methods that build a request, hand it to [`HttpClient`] and decode
//! the answer. All of them share the two-level result shape: fatal
//! failures are the outer `Err`, errors the API reports are the inner
//! [`ApiResult`] error.
//!
//! ```no_run
//! use escavador_sdk::{ClientConfig, Escavador};
//!
//! # async fn run() -> escavador_sdk::Result<()> {
//! let escavador = Escavador::new(ClientConfig::from_env()?)?;
//! match escavador.processos().movimentacoes("0000000-00.0000.0.00.0000", 50).await? {
//!     Ok(movimentacoes) => println!("{} movements", movimentacoes.len()),
//!     Err(api_error) => eprintln!("{api_error}"),
//! }
//! # Ok(())
//! # }
//! ```

mod busca;
mod creditos;
mod documentos;
mod envolvidos;
mod processos;
mod tribunais;

pub use busca::{BuscaEnvolvido, BuscaOab, DEFAULT_QTD};
pub use creditos::Creditos;
pub use documentos::Documentos;
pub use envolvidos::Envolvidos;
pub use processos::Processos;
pub use tribunais::Tribunais;

use crate::config::ClientConfig;
use crate::decode::FromJson;
use crate::error::{ApiResult, Error, Result};
use crate::http::{classify, Envelope, HttpClient, RequestConfig};
use crate::pagination::{Paginator, ResultCollection};
use crate::types::ApiVersion;
use serde_json::Value;

/// Entry point to every endpoint
#[derive(Debug, Clone)]
pub struct Escavador {
    client: HttpClient,
}

impl Escavador {
    /// Create a client from a config
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }

    /// Create a client configured from `ESCAVADOR_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Wrap an existing HTTP client
    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }

    /// The underlying HTTP client, also the page source for continuations
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn processos(&self) -> Processos<'_> {
        Processos::new(&self.client)
    }

    pub fn envolvidos(&self) -> Envolvidos<'_> {
        Envolvidos::new(&self.client)
    }

    pub fn tribunais(&self) -> Tribunais<'_> {
        Tribunais::new(&self.client)
    }

    pub fn creditos(&self) -> Creditos<'_> {
        Creditos::new(&self.client)
    }

    pub fn documentos(&self) -> Documentos<'_> {
        Documentos::new(&self.client)
    }
}

// ============================================================================
// Shared request shapes
// ============================================================================

/// Classify a failed envelope, or hand back its JSON body
fn json_body(client: &HttpClient, envelope: &Envelope) -> Result<ApiResult<Value>> {
    if !envelope.success() {
        return classify(envelope, client.config().auth_failure_policy).map(Err);
    }
    envelope
        .json_body()
        .cloned()
        .map(Ok)
        .ok_or_else(|| Error::decode("expected a JSON body, got binary content"))
}

/// GET a single object
async fn fetch_one<T: FromJson>(
    client: &HttpClient,
    path: &str,
    config: RequestConfig,
) -> Result<ApiResult<T>> {
    let version = config.version;
    let envelope = client.get_with_config(path, config).await?;

    match json_body(client, &envelope)? {
        Ok(body) => T::from_json_versioned(&body, version).map(Ok),
        Err(api) => Ok(Err(api)),
    }
}

/// GET a listing and collect up to `qtd` entities
async fn fetch_listing<T: FromJson>(
    client: &HttpClient,
    path: &str,
    config: RequestConfig,
    qtd: usize,
) -> Result<ApiResult<ResultCollection<T>>> {
    let version = config.version;
    let first = client.get_with_config(path, config).await?;
    paginate(client, first, qtd, version).await
}

async fn paginate<T: FromJson>(
    client: &HttpClient,
    first: Envelope,
    qtd: usize,
    version: ApiVersion,
) -> Result<ApiResult<ResultCollection<T>>> {
    Ok(Paginator::new(version)
        .collect_up_to::<T, _>(client, first, qtd)
        .await?
        .map(|collected| collected.into_collection(version)))
}
