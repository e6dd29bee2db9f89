//! Account credit balance

use crate::decode::{lenient, FromJson};
use serde::{Deserialize, Serialize};

/// Credits left on the account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saldo {
    #[serde(deserialize_with = "lenient::float")]
    pub quantidade_creditos: f64,
}

impl Saldo {
    /// Whether a call costing `custo` credits can still be paid for
    pub fn cobre(&self, custo: f64) -> bool {
        self.quantidade_creditos >= custo
    }
}

impl FromJson for Saldo {
    const ENTITY: &'static str = "Saldo";
}
