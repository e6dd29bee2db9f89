use super::runner::collection_message;
use super::*;
use crate::api::DEFAULT_QTD;
use crate::entities::Saldo;
use crate::pagination::{ContinuationToken, ResultCollection};
use crate::types::ApiVersion;
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_parse_movimentacoes_with_default_qtd() {
    let cli = Cli::try_parse_from(["escavador", "movimentacoes", "0001234-56.2020.8.26.0100"])
        .unwrap();
    assert_eq!(
        cli.command,
        Commands::Movimentacoes {
            numero_cnj: "0001234-56.2020.8.26.0100".to_string(),
            qtd: DEFAULT_QTD,
        }
    );
    assert!(!cli.pretty);
    assert!(cli.config.is_none());
}

#[test]
fn test_parse_envolvido_with_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "escavador",
        "envolvido",
        "--cpf-cnpj",
        "12345678900",
        "--qtd",
        "5",
        "--pretty",
        "--config",
        "escavador.yaml",
        "-v",
    ])
    .unwrap();

    assert_eq!(
        cli.command,
        Commands::Envolvido {
            nome: None,
            cpf_cnpj: Some("12345678900".to_string()),
            qtd: 5,
        }
    );
    assert!(cli.pretty);
    assert!(cli.verbose);
    assert_eq!(cli.config.unwrap().to_str(), Some("escavador.yaml"));
}

#[test]
fn test_parse_requires_subcommand() {
    assert!(Cli::try_parse_from(["escavador"]).is_err());
    assert!(Cli::try_parse_from(["escavador", "processo"]).is_err());
}

#[test]
fn test_collection_message() {
    let collection = ResultCollection::from_page(
        vec![
            Saldo {
                quantidade_creditos: 10.0,
            },
            Saldo {
                quantidade_creditos: 2.5,
            },
        ],
        ContinuationToken::exhausted(ApiVersion::V2),
        200,
    );

    let message = collection_message(&collection).unwrap();
    assert_eq!(
        message,
        json!({
            "type": "RESULT",
            "count": 2,
            "has_more": false,
            "partial": null,
            "items": [
                {"quantidade_creditos": 10.0},
                {"quantidade_creditos": 2.5}
            ]
        })
    );
}
