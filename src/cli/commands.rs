//! CLI commands and argument parsing

use crate::api::DEFAULT_QTD;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Escavador legal-records API client
#[derive(Parser, Debug)]
#[command(name = "escavador")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); `ESCAVADOR_*` variables are used otherwise
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Look up a process by CNJ number
    Processo {
        /// CNJ number (`0000000-00.0000.0.00.0000`)
        numero_cnj: String,
    },

    /// List the movements of a process
    Movimentacoes {
        /// CNJ number
        numero_cnj: String,

        /// Maximum movements to fetch
        #[arg(long, default_value_t = DEFAULT_QTD)]
        qtd: usize,
    },

    /// Search the processes of a party by name or CPF/CNPJ
    Envolvido {
        /// Party name
        #[arg(long)]
        nome: Option<String>,

        /// Party CPF or CNPJ
        #[arg(long)]
        cpf_cnpj: Option<String>,

        /// Maximum processes to fetch
        #[arg(long, default_value_t = DEFAULT_QTD)]
        qtd: usize,
    },

    /// List covered courts
    Tribunais,

    /// Show remaining account credits
    Saldo,
}
