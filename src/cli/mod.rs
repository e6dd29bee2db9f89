//! CLI module
//!
//! Command-line access to the most common endpoints.
//!
//! # Commands
//!
//! - `processo` - Look up a process by CNJ number
//! - `movimentacoes` - List the movements of a process
//! - `envolvido` - Search processes by party
//! - `tribunais` - List covered courts
//! - `saldo` - Show remaining credits

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;

#[cfg(test)]
mod tests;
