//! Party searches (v2)

use super::{json_body, paginate, BuscaEnvolvido};
use crate::decode::decode;
use crate::entities::{EnvolvidoEncontrado, Processo};
use crate::error::{ApiResult, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::ResultCollection;
use crate::types::ApiVersion;

/// Key of the matched party, next to `items`
const ENVOLVIDO_ENCONTRADO: &str = "envolvido_encontrado";

/// Party endpoints
#[derive(Debug, Clone, Copy)]
pub struct Envolvidos<'a> {
    client: &'a HttpClient,
}

impl<'a> Envolvidos<'a> {
    pub(super) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// The party a search matched, with the processes it takes part in
    pub async fn processos(
        &self,
        busca: &BuscaEnvolvido,
    ) -> Result<ApiResult<(Option<EnvolvidoEncontrado>, ResultCollection<Processo>)>> {
        busca.validate()?;

        let first = self
            .client
            .get_with_config(
                "envolvido/processos",
                RequestConfig::new().query_object(busca.to_query()),
            )
            .await?;

        let encontrado = match json_body(self.client, &first)? {
            Ok(body) => decode::<EnvolvidoEncontrado>(body.get(ENVOLVIDO_ENCONTRADO))?,
            Err(api) => return Ok(Err(api)),
        };

        Ok(paginate(self.client, first, busca.qtd, ApiVersion::V2)
            .await?
            .map(|processos| (encontrado, processos)))
    }
}
