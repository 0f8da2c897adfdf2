//! Column type inference from the first row of a batch

use super::types::{ColumnType, EvidenceType};
use crate::normalize::{FieldValue, Row};

/// Classify a single value
pub fn classify(value: &FieldValue) -> EvidenceType {
    match value {
        FieldValue::Number(_) => EvidenceType::Number,
        FieldValue::Date(_) => EvidenceType::Date,
        FieldValue::Null | FieldValue::Bool(_) | FieldValue::String(_) => EvidenceType::String,
    }
}

/// Infer one column type per field of `first_row`, in field order
pub fn infer_column_types(first_row: &Row) -> Vec<ColumnType> {
    first_row
        .iter()
        .map(|(name, value)| ColumnType::inferred(name, classify(value)))
        .collect()
}
