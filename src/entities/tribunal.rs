//! Courts and the states they cover

use crate::decode::{decode_list, lenient, FromJson};
use crate::error::{Error, Result};
use crate::types::ApiVersion;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Brazilian state covered by a court
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estado {
    /// Two-letter code (`MG`, `SP`)
    pub sigla: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
}

impl FromJson for Estado {
    const ENTITY: &'static str = "Estado";

    /// v1 lists states as bare codes
    fn from_json_versioned(json: &Value, version: ApiVersion) -> Result<Self> {
        match (version, json) {
            (ApiVersion::V1, Value::String(sigla)) => Ok(Self {
                sigla: sigla.clone(),
                nome: None,
            }),
            (ApiVersion::V1, Value::Object(_)) | (ApiVersion::V2, _) => Self::from_json(json),
            (ApiVersion::V1, other) => Err(Error::decode(format!(
                "expected a state code or object, got {other}"
            ))),
        }
    }
}

/// A court the API collects records from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tribunal {
    pub id: i64,
    pub nome: String,
    pub sigla: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub estados: Vec<Estado>,
}

impl Tribunal {
    /// Whether the court covers the state with the given code
    pub fn abrange(&self, sigla: &str) -> bool {
        self.estados
            .iter()
            .any(|e| e.sigla.eq_ignore_ascii_case(sigla))
    }
}

impl FromJson for Tribunal {
    const ENTITY: &'static str = "Tribunal";

    /// v1 lists covered states as bare codes
    fn from_json_versioned(json: &Value, version: ApiVersion) -> Result<Self> {
        let mut tribunal = Self::from_json(json)?;
        if version == ApiVersion::V1 {
            tribunal.estados = decode_list(json.get("estados"), version);
        }
        Ok(tribunal)
    }
}

// Identity is the court itself; the covered states are informative only
impl PartialEq for Tribunal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.nome == other.nome
            && self.sigla == other.sigla
            && self.categoria == other.categoria
    }
}
