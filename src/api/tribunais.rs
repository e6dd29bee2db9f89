//! Courts

use super::{fetch_listing, fetch_one, json_body};
use crate::decode::FromJson;
use crate::entities::Tribunal;
use crate::error::{ApiResult, Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::ResultCollection;
use crate::types::ApiVersion;

/// Court endpoints
#[derive(Debug, Clone, Copy)]
pub struct Tribunais<'a> {
    client: &'a HttpClient,
}

impl<'a> Tribunais<'a> {
    pub(super) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Courts covered by the v2 API
    pub async fn listar(&self) -> Result<ApiResult<ResultCollection<Tribunal>>> {
        fetch_listing(self.client, "tribunais", RequestConfig::new(), 0).await
    }

    /// Court systems available on the v1 API
    pub async fn origens(&self) -> Result<ApiResult<Vec<Tribunal>>> {
        let envelope = self
            .client
            .get_with_config("tribunal/origens", RequestConfig::new().version(ApiVersion::V1))
            .await?;

        let body = match json_body(self.client, &envelope)? {
            Ok(body) => body,
            Err(api) => return Ok(Err(api)),
        };

        // Some deployments wrap the list in `items`
        let list = body
            .as_array()
            .or_else(|| body.get("items").and_then(|items| items.as_array()))
            .ok_or_else(|| Error::decode("expected a list of courts"))?;

        list.iter()
            .map(|json| Tribunal::from_json_versioned(json, ApiVersion::V1))
            .collect::<Result<Vec<_>>>()
            .map(Ok)
    }

    /// Details of one v1 court system
    pub async fn detalhes(&self, sigla: &str) -> Result<ApiResult<Tribunal>> {
        fetch_one(
            self.client,
            &format!("tribunal/origens/{sigla}"),
            RequestConfig::new().version(ApiVersion::V1),
        )
        .await
    }
}
