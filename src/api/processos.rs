//! Process lookups and searches (v2)

use super::{fetch_listing, fetch_one, BuscaEnvolvido, BuscaOab};
use crate::entities::{Movimentacao, Processo};
use crate::error::{ApiResult, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::ResultCollection;

/// Process endpoints
#[derive(Debug, Clone, Copy)]
pub struct Processos<'a> {
    client: &'a HttpClient,
}

impl<'a> Processos<'a> {
    pub(super) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// A process by its CNJ number
    pub async fn por_numero(&self, numero_cnj: &str) -> Result<ApiResult<Processo>> {
        fetch_one(
            self.client,
            &format!("processos/numero_cnj/{numero_cnj}"),
            RequestConfig::new(),
        )
        .await
    }

    /// Up to `qtd` movements of a process, most recent first
    pub async fn movimentacoes(
        &self,
        numero_cnj: &str,
        qtd: usize,
    ) -> Result<ApiResult<ResultCollection<Movimentacao>>> {
        fetch_listing(
            self.client,
            &format!("processos/numero_cnj/{numero_cnj}/movimentacoes"),
            RequestConfig::new(),
            qtd,
        )
        .await
    }

    /// Processes a party takes part in.
    ///
    /// If a follow-up page fails, the processes collected so far are
    /// returned with the failure recorded on the collection.
    pub async fn por_envolvido(
        &self,
        busca: &BuscaEnvolvido,
    ) -> Result<ApiResult<ResultCollection<Processo>>> {
        busca.validate()?;
        fetch_listing(
            self.client,
            "envolvido/processos",
            RequestConfig::new().query_object(busca.to_query()),
            busca.qtd,
        )
        .await
    }

    /// Processes of a person or organization found by name
    pub async fn por_nome(
        &self,
        nome: &str,
        qtd: usize,
    ) -> Result<ApiResult<ResultCollection<Processo>>> {
        self.por_envolvido(&BuscaEnvolvido::por_nome(nome).qtd(qtd))
            .await
    }

    /// Processes of a person found by CPF
    pub async fn por_cpf(
        &self,
        cpf: &str,
        qtd: usize,
    ) -> Result<ApiResult<ResultCollection<Processo>>> {
        self.por_envolvido(&BuscaEnvolvido::por_documento(cpf).qtd(qtd))
            .await
    }

    /// Processes of an organization found by CNPJ
    pub async fn por_cnpj(
        &self,
        cnpj: &str,
        qtd: usize,
    ) -> Result<ApiResult<ResultCollection<Processo>>> {
        self.por_envolvido(&BuscaEnvolvido::por_documento(cnpj).qtd(qtd))
            .await
    }

    /// Processes of a lawyer found by OAB registration
    pub async fn por_oab(&self, busca: &BuscaOab) -> Result<ApiResult<ResultCollection<Processo>>> {
        fetch_listing(
            self.client,
            "advogado/processos",
            RequestConfig::new().query_object(busca.to_query()),
            busca.qtd,
        )
        .await
    }
}
