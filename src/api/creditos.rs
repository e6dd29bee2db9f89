//! Account credits (v1)

use super::fetch_one;
use crate::entities::Saldo;
use crate::error::{ApiResult, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::ApiVersion;

/// Credit endpoints
#[derive(Debug, Clone, Copy)]
pub struct Creditos<'a> {
    client: &'a HttpClient,
}

impl<'a> Creditos<'a> {
    pub(super) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Credits left on the account
    pub async fn quantidade(&self) -> Result<ApiResult<Saldo>> {
        fetch_one(
            self.client,
            "quantidade-creditos",
            RequestConfig::new().version(ApiVersion::V1),
        )
        .await
    }
}
