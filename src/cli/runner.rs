//! CLI runner - executes commands

use crate::api::{BuscaEnvolvido, Escavador};
use crate::cli::commands::{Cli, Commands};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, Error, Result, ResultExt};
use crate::pagination::ResultCollection;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let escavador = Escavador::new(self.load_config()?)?;

        match &self.cli.command {
            Commands::Processo { numero_cnj } => {
                let processo = escavador.processos().por_numero(numero_cnj).await?;
                self.emit_one(processo)
            }
            Commands::Movimentacoes { numero_cnj, qtd } => {
                let movimentacoes = escavador
                    .processos()
                    .movimentacoes(numero_cnj, *qtd)
                    .await?;
                self.emit_collection(movimentacoes)
            }
            Commands::Envolvido {
                nome,
                cpf_cnpj,
                qtd,
            } => {
                let busca = BuscaEnvolvido {
                    nome: nome.clone(),
                    cpf_cnpj: cpf_cnpj.clone(),
                    qtd: *qtd,
                    ..BuscaEnvolvido::default()
                };
                match escavador.envolvidos().processos(&busca).await? {
                    Ok((encontrado, processos)) => {
                        let mut message = collection_message(&processos)?;
                        message["envolvido"] = serde_json::to_value(encontrado)?;
                        self.output_message(&message)
                    }
                    Err(api) => self.fail(api),
                }
            }
            Commands::Tribunais => {
                let tribunais = escavador.tribunais().listar().await?;
                self.emit_collection(tribunais)
            }
            Commands::Saldo => {
                let saldo = escavador.creditos().quantidade().await?;
                self.emit_one(saldo)
            }
        }
    }

    /// Load configuration from `--config`, or the environment
    fn load_config(&self) -> Result<ClientConfig> {
        if let Some(path) = &self.cli.config {
            debug!(path = %path.display(), "Loading config file");
            ClientConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))
        } else {
            ClientConfig::from_env()
        }
    }

    fn emit_one<T: Serialize>(&self, result: ApiResult<T>) -> Result<()> {
        match result {
            Ok(value) => self.output_message(&json!({
                "type": "RESULT",
                "result": serde_json::to_value(value)?,
            })),
            Err(api) => self.fail(api),
        }
    }

    fn emit_collection<T: Serialize>(&self, result: ApiResult<ResultCollection<T>>) -> Result<()> {
        match result {
            Ok(collection) => self.output_message(&collection_message(&collection)?),
            Err(api) => self.fail(api),
        }
    }

    /// Report an API error and turn it into a failing exit
    fn fail(&self, api: ApiError) -> Result<()> {
        self.output_message(&json!({ "type": "ERROR", "error": &api }))?;
        Err(Error::Api(api))
    }

    /// Output a message as JSON
    fn output_message(&self, msg: &Value) -> Result<()> {
        let text = if self.cli.pretty {
            serde_json::to_string_pretty(msg)?
        } else {
            serde_json::to_string(msg)?
        };
        println!("{text}");
        Ok(())
    }
}

/// JSON message for a collection, with its early-stop annotation if any
pub(crate) fn collection_message<T: Serialize>(collection: &ResultCollection<T>) -> Result<Value> {
    let partial = collection.partial_error().map(|partial| {
        info!(status = partial.status, "Results are incomplete");
        json!({
            "reason": partial.reason,
            "status": partial.status,
            "error": partial.error,
            "cause": partial.cause,
        })
    });

    Ok(json!({
        "type": "RESULT",
        "count": collection.len(),
        "has_more": collection.has_more(),
        "partial": partial,
        "items": serde_json::to_value(collection)?,
    }))
}
