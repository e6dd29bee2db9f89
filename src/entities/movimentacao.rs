//! Movements recorded on a process

use super::{parse_date, Tribunal};
use crate::decode::FromJson;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Source a movement was extracted from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FonteMovimentacao {
    #[serde(rename = "fonte_id")]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigla: Option<String>,
    /// Instance: 1, 2 or 3
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grau: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grau_formatado: Option<String>,
    /// Gazette section, when the source is an official gazette
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caderno: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tribunal: Option<Tribunal>,
}

impl FromJson for FonteMovimentacao {
    const ENTITY: &'static str = "FonteMovimentacao";
}

impl PartialEq for FonteMovimentacao {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.nome == other.nome
            && self.tipo == other.tipo
            && self.sigla == other.sigla
            && self.grau == other.grau
            && self.grau_formatado == other.grau_formatado
    }
}

/// One movement on a process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movimentacao {
    pub id: i64,
    /// `YYYY-MM-DD`
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conteudo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonte: Option<FonteMovimentacao>,
}

impl Movimentacao {
    /// The movement date, if it is a valid `YYYY-MM-DD` string
    pub fn data_as_date(&self) -> Option<NaiveDate> {
        parse_date(&self.data)
    }
}

impl FromJson for Movimentacao {
    const ENTITY: &'static str = "Movimentacao";
}

impl PartialEq for Movimentacao {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.data == other.data
            && self.tipo == other.tipo
            && self.conteudo == other.conteudo
    }
}
