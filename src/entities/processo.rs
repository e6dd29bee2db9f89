//! Processes and everything nested under them

use super::{format_currency, parse_date, Envolvido, Tribunal};
use crate::decode::{lenient, FromJson};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// Processo
// ============================================================================

/// A legal process, identified by its CNJ number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processo {
    /// `NNNNNNN-DD.AAAA.J.TR.OOOO`
    pub numero_cnj: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo_polo_ativo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo_polo_passivo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ano_inicio: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_ultima_movimentacao: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub quantidade_movimentacoes: i64,
    /// Every court holding the process has archived it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fontes_tribunais_estao_arquivadas: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_ultima_verificacao: Option<String>,
    /// Human readable, e.g. "há 29 minutos"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo_desde_ultima_verificacao: Option<String>,
    /// What matched a party search (`NOME`, `DOCUMENTO`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_match: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::entity",
        skip_serializing_if = "Option::is_none"
    )]
    pub match_fontes: Option<MatchFontes>,
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fontes: Vec<FonteProcesso>,
}

impl Processo {
    pub fn data_inicio_as_date(&self) -> Option<NaiveDate> {
        self.data_inicio.as_deref().and_then(parse_date)
    }

    pub fn data_ultima_movimentacao_as_date(&self) -> Option<NaiveDate> {
        self.data_ultima_movimentacao.as_deref().and_then(parse_date)
    }

    /// Sources that are courts, as opposed to official gazettes
    pub fn fontes_tribunais(&self) -> impl Iterator<Item = &FonteProcesso> {
        self.fontes.iter().filter(|f| f.tipo == "TRIBUNAL")
    }
}

impl FromJson for Processo {
    const ENTITY: &'static str = "Processo";
}

/// Which kinds of source matched a party search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFontes {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub tribunal: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub diario_oficial: bool,
}

impl MatchFontes {
    pub fn any(&self) -> bool {
        self.tribunal || self.diario_oficial
    }
}

impl FromJson for MatchFontes {
    const ENTITY: &'static str = "MatchFontes";
}

// ============================================================================
// FonteProcesso
// ============================================================================

/// A source (court or gazette) a process was extracted from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FonteProcesso {
    pub id: i64,
    pub processo_fonte_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub nome: String,
    pub sigla: String,
    /// `TRIBUNAL` or `DIARIO`
    pub tipo: String,
    #[serde(deserialize_with = "lenient::nullable")]
    pub grau: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grau_formatado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sistema: Option<String>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub data_inicio: Option<String>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub data_ultima_movimentacao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_ultima_verificacao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fisico: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segredo_justica: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arquivado: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_predito: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantidade_movimentacoes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantidade_envolvidos: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caderno: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tribunal: Option<Tribunal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capa: Option<CapaProcessoTribunal>,
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub envolvidos: Vec<Envolvido>,
}

impl FromJson for FonteProcesso {
    const ENTITY: &'static str = "FonteProcesso";
}

// Cover and parties are details of the source, not part of its identity
impl PartialEq for FonteProcesso {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.processo_fonte_id == other.processo_fonte_id
            && self.descricao == other.descricao
            && self.nome == other.nome
            && self.sigla == other.sigla
            && self.tipo == other.tipo
            && self.grau == other.grau
            && self.sistema == other.sistema
            && self.data_inicio == other.data_inicio
            && self.data_ultima_movimentacao == other.data_ultima_movimentacao
            && self.fisico == other.fisico
            && self.tribunal == other.tribunal
    }
}

// ============================================================================
// Capa
// ============================================================================

/// Cover sheet of a process at one court
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapaProcessoTribunal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assunto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assunto_principal_normalizado: Option<Assunto>,
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub assuntos_normalizados: Vec<Assunto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orgao_julgador: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_distribuicao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_arquivamento: Option<String>,
    /// Courts without a value send an object of nulls, which decodes to `None`
    #[serde(
        default,
        deserialize_with = "lenient::entity",
        skip_serializing_if = "Option::is_none"
    )]
    pub valor_causa: Option<ValorCausa>,
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub informacoes_complementares: Vec<InformacaoComplementar>,
}

impl CapaProcessoTribunal {
    pub fn data_distribuicao_as_date(&self) -> Option<NaiveDate> {
        self.data_distribuicao.as_deref().and_then(parse_date)
    }
}

impl FromJson for CapaProcessoTribunal {
    const ENTITY: &'static str = "CapaProcessoTribunal";
}

/// A normalized subject from the CNJ subject tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assunto {
    pub id: i64,
    pub nome: String,
    pub nome_com_pai: String,
    /// Path from the tree root, separated by ` > `
    pub path_completo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bloqueado: Option<bool>,
}

impl FromJson for Assunto {
    const ENTITY: &'static str = "Assunto";
}

impl PartialEq for Assunto {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.path_completo == other.path_completo
    }
}

/// Free-form extra information on a cover sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InformacaoComplementar {
    pub tipo: String,
    pub valor: String,
}

impl FromJson for InformacaoComplementar {
    const ENTITY: &'static str = "InformacaoComplementar";
}

// ============================================================================
// ValorCausa
// ============================================================================

/// Monetary value of a case.
///
/// Equality looks at the amount and currency only. Values in different
/// currencies are unordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ValorCausaPayload")]
pub struct ValorCausa {
    pub valor: f64,
    pub moeda: String,
    /// Display form; derived from `valor` and `moeda` when not sent
    pub valor_formatado: String,
}

impl ValorCausa {
    /// Build a value, deriving its display form
    pub fn new(valor: f64, moeda: impl Into<String>) -> Self {
        let moeda = moeda.into();
        Self {
            valor_formatado: format_currency(valor, &moeda),
            valor,
            moeda,
        }
    }
}

/// Wire form; the display string may be missing, null or blank
#[derive(Deserialize)]
struct ValorCausaPayload {
    #[serde(deserialize_with = "lenient::float")]
    valor: f64,
    moeda: String,
    #[serde(default)]
    valor_formatado: Option<String>,
}

impl From<ValorCausaPayload> for ValorCausa {
    fn from(payload: ValorCausaPayload) -> Self {
        match payload.valor_formatado {
            Some(formatado) if !formatado.trim().is_empty() => Self {
                valor: payload.valor,
                moeda: payload.moeda,
                valor_formatado: formatado,
            },
            _ => Self::new(payload.valor, payload.moeda),
        }
    }
}

impl FromJson for ValorCausa {
    const ENTITY: &'static str = "ValorCausa";
}

impl PartialEq for ValorCausa {
    fn eq(&self, other: &Self) -> bool {
        self.valor == other.valor && self.moeda == other.moeda
    }
}

impl PartialOrd for ValorCausa {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.moeda != other.moeda {
            return None;
        }
        self.valor.partial_cmp(&other.valor)
    }
}

impl fmt::Display for ValorCausa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.valor_formatado)
    }
}
