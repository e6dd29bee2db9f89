//! Parties involved in processes

use crate::decode::{lenient, FromJson};
use serde::{Deserialize, Serialize};

/// A Brazilian bar (OAB) registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Oab {
    pub numero: i64,
    pub uf: String,
    /// Registration kind, e.g. `ADVOGADO`
    pub tipo: String,
}

impl FromJson for Oab {
    const ENTITY: &'static str = "Oab";
}

/// A person or organization taking part in a process.
///
/// Lawyers appear both as parties of their own and nested under the
/// parties they represent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envolvido {
    #[serde(deserialize_with = "lenient::nullable")]
    pub nome: Option<String>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_normalizado: Option<String>,
    /// `FISICA` or `JURIDICA`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_pessoa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantidade_processos: Option<i64>,
    /// `ATIVO`, `PASSIVO`, `NENHUM` or `DESCONHECIDO`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefixo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sufixo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub oabs: Vec<Oab>,
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub advogados: Vec<Envolvido>,
}

impl Envolvido {
    /// CPF for people, CNPJ for organizations
    pub fn documento(&self) -> Option<&str> {
        self.cpf.as_deref().or(self.cnpj.as_deref())
    }

    /// Whether the party is a lawyer with at least one OAB registration
    pub fn is_advogado(&self) -> bool {
        !self.oabs.is_empty()
    }
}

impl FromJson for Envolvido {
    const ENTITY: &'static str = "Envolvido";
}

impl PartialEq for Envolvido {
    fn eq(&self, other: &Self) -> bool {
        self.nome == other.nome
            && self.tipo == other.tipo
            && self.tipo_normalizado == other.tipo_normalizado
            && self.tipo_pessoa == other.tipo_pessoa
            && self.quantidade_processos == other.quantidade_processos
            && self.polo == other.polo
            && self.prefixo == other.prefixo
            && self.sufixo == other.sufixo
            && self.cpf == other.cpf
            && self.cnpj == other.cnpj
            && self.oabs == other.oabs
    }
}

/// The party matched by a search by name or document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvolvidoEncontrado {
    pub nome: String,
    pub tipo_pessoa: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub quantidade_processos: i64,
}

impl FromJson for EnvolvidoEncontrado {
    const ENTITY: &'static str = "EnvolvidoEncontrado";
}
