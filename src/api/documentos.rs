//! PDF downloads
//!
//! Documents come back as raw bytes; writing them anywhere is up to the
//! caller.

use crate::error::{ApiResult, Error, Result};
use crate::http::{classify, EnvelopeBody, HttpClient, RequestConfig};
use crate::types::ApiVersion;
use bytes::Bytes;

/// Document endpoints
#[derive(Debug, Clone, Copy)]
pub struct Documentos<'a> {
    client: &'a HttpClient,
}

impl<'a> Documentos<'a> {
    pub(super) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Download the PDF at `path`, relative to the given API revision
    pub async fn baixar_pdf(&self, path: &str, version: ApiVersion) -> Result<ApiResult<Bytes>> {
        let envelope = self
            .client
            .get_with_config(path, RequestConfig::new().version(version))
            .await?;

        if !envelope.success() {
            return classify(&envelope, self.client.config().auth_failure_policy).map(Err);
        }

        match envelope.into_body() {
            EnvelopeBody::Binary(bytes) => Ok(Ok(bytes)),
            EnvelopeBody::Json(_) => Err(Error::decode(format!(
                "expected a PDF from '{path}', got JSON"
            ))),
        }
    }

    /// One page of an official gazette edition
    pub async fn pagina_diario(&self, id_diario: u64, pagina: u32) -> Result<ApiResult<Bytes>> {
        self.baixar_pdf(
            &format!("diarios/{id_diario}/pdf/pagina/{pagina}/baixar"),
            ApiVersion::V1,
        )
        .await
    }
}
