//! Schema types

use serde::{Deserialize, Serialize};

/// Column type as understood by the host reporting tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceType {
    #[default]
    String,
    Number,
    Date,
}

impl std::fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvidenceType::String => write!(f, "string"),
            EvidenceType::Number => write!(f, "number"),
            EvidenceType::Date => write!(f, "date"),
        }
    }
}

/// Confidence tag for a column type.
///
/// Only `Inferred` exists: a stronger tag would need a user-declared schema,
/// which this connector does not accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFidelity {
    #[default]
    Inferred,
}

/// Column type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnType {
    /// Column (field) name
    pub name: String,
    /// Evidence type
    pub evidence_type: EvidenceType,
    /// Type fidelity
    pub type_fidelity: TypeFidelity,
}

impl ColumnType {
    /// Create an inferred column type
    pub fn inferred(name: impl Into<String>, evidence_type: EvidenceType) -> Self {
        Self {
            name: name.into(),
            evidence_type,
            type_fidelity: TypeFidelity::Inferred,
        }
    }
}
