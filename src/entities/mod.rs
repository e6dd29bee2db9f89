//! Domain entities
//!
//! One canonical schema per entity, shaped after the v2 API. Payloads of
//! older revisions are adapted by the entity's versioned decoder rather
//! than by parallel types.
//!
//! Entities are plain data. Pagination state travels next to them in a
//! [`crate::ContinuationToken`], never inside them.

mod envolvido;
mod movimentacao;
mod processo;
mod saldo;
mod tribunal;

pub use envolvido::{Envolvido, EnvolvidoEncontrado, Oab};
pub use movimentacao::{FonteMovimentacao, Movimentacao};
pub use processo::{
    Assunto, CapaProcessoTribunal, FonteProcesso, InformacaoComplementar, MatchFontes, Processo,
    ValorCausa,
};
pub use saldo::Saldo;
pub use tribunal::{Estado, Tribunal};

use chrono::NaiveDate;

/// Parse the `YYYY-MM-DD` prefix of a date or timestamp string
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Format an amount the way Brazilian currency is written.
///
/// Thousands are grouped with `.`, cents follow a `,` and the currency
/// code comes first: `1234.5` in `R$` is `R$ 1.234,50`.
pub fn format_currency(valor: f64, moeda: &str) -> String {
    let cents = (valor.abs() * 100.0).round() as u64;
    let inteiro = (cents / 100).to_string();
    let centavos = cents % 100;

    let mut agrupado = String::with_capacity(inteiro.len() + inteiro.len() / 3);
    for (i, digit) in inteiro.chars().enumerate() {
        if i > 0 && (inteiro.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(digit);
    }

    let sinal = if valor < 0.0 && cents > 0 { "-" } else { "" };
    let moeda = moeda.trim();
    if moeda.is_empty() {
        format!("{sinal}{agrupado},{centavos:02}")
    } else {
        format!("{moeda} {sinal}{agrupado},{centavos:02}")
    }
}

#[cfg(test)]
mod tests;
