//! Record flattening

use super::types::{FieldValue, Row};
use crate::error::{Error, Result};
use crate::types::{JsonValue, RawRecord};

/// Deepest nesting a structured value may have before flattening refuses it.
/// Matches the recursion limit serde_json applies when parsing.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Flatten one value. Objects and arrays are serialized to compact JSON.
pub fn flatten_value(field: &str, value: &JsonValue) -> Result<FieldValue> {
    Ok(match value {
        JsonValue::Null => FieldValue::Null,
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Number(n) => FieldValue::Number(n.clone()),
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            if exceeds_depth(value, MAX_NESTING_DEPTH) {
                return Err(Error::serialization(
                    field,
                    format!("nested deeper than {MAX_NESTING_DEPTH} levels"),
                ));
            }
            FieldValue::String(
                serde_json::to_string(value)
                    .map_err(|e| Error::serialization(field, e.to_string()))?,
            )
        }
    })
}

/// Flatten every field of a record, keeping the record's key order
pub fn flatten_record(record: &RawRecord) -> Result<Row> {
    let mut row = Row::with_capacity(record.len());
    for (field, value) in record {
        row.insert(field.as_str(), flatten_value(field, value)?);
    }
    Ok(row)
}

// Stops descending as soon as the budget runs out.
fn exceeds_depth(value: &JsonValue, budget: usize) -> bool {
    let mut children: Box<dyn Iterator<Item = &JsonValue>> = match value {
        JsonValue::Array(items) => Box::new(items.iter()),
        JsonValue::Object(map) => Box::new(map.values()),
        _ => return false,
    };
    if budget == 0 {
        return true;
    }
    children.any(|child| exceeds_depth(child, budget - 1))
}
