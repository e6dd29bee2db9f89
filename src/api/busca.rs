//! Search filters for process listings

use crate::error::{Error, Result};
use crate::types::{CriterioOrdenacao, Ordem};
use serde_json::{json, Value};

/// Results requested when the caller does not say
pub const DEFAULT_QTD: usize = 100;

/// Filters for searching processes by party.
///
/// At least one of name or CPF/CNPJ is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuscaEnvolvido {
    pub nome: Option<String>,
    pub cpf_cnpj: Option<String>,
    pub ordena_por: Option<CriterioOrdenacao>,
    pub ordem: Option<Ordem>,
    /// Court codes to restrict the search to
    pub tribunais: Vec<String>,
    pub qtd: usize,
}

impl Default for BuscaEnvolvido {
    fn default() -> Self {
        Self {
            nome: None,
            cpf_cnpj: None,
            ordena_por: None,
            ordem: None,
            tribunais: Vec::new(),
            qtd: DEFAULT_QTD,
        }
    }
}

impl BuscaEnvolvido {
    /// Search by party name
    pub fn por_nome(nome: impl Into<String>) -> Self {
        Self {
            nome: Some(nome.into()),
            ..Self::default()
        }
    }

    /// Search by CPF or CNPJ, formatted or not
    pub fn por_documento(cpf_cnpj: impl Into<String>) -> Self {
        Self {
            cpf_cnpj: Some(cpf_cnpj.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn nome(mut self, nome: impl Into<String>) -> Self {
        self.nome = Some(nome.into());
        self
    }

    #[must_use]
    pub fn cpf_cnpj(mut self, cpf_cnpj: impl Into<String>) -> Self {
        self.cpf_cnpj = Some(cpf_cnpj.into());
        self
    }

    #[must_use]
    pub fn ordena_por(mut self, criterio: CriterioOrdenacao) -> Self {
        self.ordena_por = Some(criterio);
        self
    }

    #[must_use]
    pub fn ordem(mut self, ordem: Ordem) -> Self {
        self.ordem = Some(ordem);
        self
    }

    #[must_use]
    pub fn tribunais<I, S>(mut self, siglas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tribunais = siglas.into_iter().map(Into::into).collect();
        self
    }

    /// Number of processes to collect
    #[must_use]
    pub fn qtd(mut self, qtd: usize) -> Self {
        self.qtd = qtd;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let informado = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if informado(&self.nome) || informado(&self.cpf_cnpj) {
            Ok(())
        } else {
            Err(Error::invalid_argument(
                "a party search needs a name or a CPF/CNPJ",
            ))
        }
    }

    /// Query parameters; unset filters are null and never sent
    pub(crate) fn to_query(&self) -> Value {
        json!({
            "nome": self.nome,
            "cpf_cnpj": self.cpf_cnpj,
            "tribunais": (!self.tribunais.is_empty()).then_some(&self.tribunais),
            "ordena_por": self.ordena_por.map(CriterioOrdenacao::as_str),
            "ordem": self.ordem.map(Ordem::as_str),
        })
    }
}

/// Filters for searching a lawyer's processes by OAB registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuscaOab {
    pub numero: String,
    /// State of the registration (`SP`, `BA`)
    pub estado: String,
    pub ordena_por: Option<CriterioOrdenacao>,
    pub ordem: Option<Ordem>,
    pub qtd: usize,
}

impl BuscaOab {
    pub fn new(numero: impl ToString, estado: impl Into<String>) -> Self {
        Self {
            numero: numero.to_string(),
            estado: estado.into(),
            ordena_por: None,
            ordem: None,
            qtd: DEFAULT_QTD,
        }
    }

    #[must_use]
    pub fn ordena_por(mut self, criterio: CriterioOrdenacao) -> Self {
        self.ordena_por = Some(criterio);
        self
    }

    #[must_use]
    pub fn ordem(mut self, ordem: Ordem) -> Self {
        self.ordem = Some(ordem);
        self
    }

    #[must_use]
    pub fn qtd(mut self, qtd: usize) -> Self {
        self.qtd = qtd;
        self
    }

    pub(crate) fn to_query(&self) -> Value {
        json!({
            "oab_numero": self.numero,
            "oab_estado": self.estado.to_uppercase(),
            "ordena_por": self.ordena_por.map(CriterioOrdenacao::as_str),
            "ordem": self.ordem.map(Ordem::as_str),
        })
    }
}
