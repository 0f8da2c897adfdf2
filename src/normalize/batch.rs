//! Row batches

use super::flatten::flatten_record;
use super::types::Row;
use crate::error::Result;
use crate::schema::{infer_column_types, ColumnType};
use crate::types::RawRecord;
use serde::Serialize;
use tracing::debug;

/// One resource worth of rows, as handed to the host
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowBatch {
    /// Flattened rows, in vendor order
    pub rows: Vec<Row>,
    /// Column types inferred from `rows[0]`
    pub column_types: Vec<ColumnType>,
    /// Always `rows.len()`
    pub expected_row_count: usize,
    /// Resource name
    pub name: String,
    /// Cache key surrogate; never the data itself
    pub content: String,
}

impl RowBatch {
    /// Package rows into a batch. Returns `None` for an empty row set.
    pub fn from_rows(
        name: impl Into<String>,
        rows: Vec<Row>,
        content: impl Into<String>,
    ) -> Option<Self> {
        let column_types = infer_column_types(rows.first()?);
        Some(Self {
            expected_row_count: rows.len(),
            rows,
            column_types,
            name: name.into(),
            content: content.into(),
        })
    }

    /// Look up a column type by name
    pub fn column(&self, name: &str) -> Option<&ColumnType> {
        self.column_types.iter().find(|c| c.name == name)
    }

    /// Serialize to the host wire shape
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Cache key surrogate: the resource name and a redacted key fragment
pub fn cache_content(resource: &str, redacted_key: &str) -> String {
    serde_json::json!({
        "resource": resource,
        "apiKey": redacted_key,
    })
    .to_string()
}

/// Builds row batches for one run
#[derive(Debug, Clone)]
pub struct Normalizer {
    redacted_key: String,
}

impl Normalizer {
    /// Create a normalizer tagging batches with the given redacted key
    pub fn new(redacted_key: impl Into<String>) -> Self {
        Self {
            redacted_key: redacted_key.into(),
        }
    }

    /// Flatten and package a raw collection; `None` when it is empty
    pub fn normalize(&self, resource: &str, records: &[RawRecord]) -> Result<Option<RowBatch>> {
        let rows = records
            .iter()
            .map(flatten_record)
            .collect::<Result<Vec<_>>>()?;

        debug!("Normalized {} rows for {}", rows.len(), resource);

        Ok(RowBatch::from_rows(
            resource,
            rows,
            cache_content(resource, &self.redacted_key),
        ))
    }
}
