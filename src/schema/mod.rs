//! Column type inference
//!
//! Assigns each column of a batch one of three evidence types using only
//! the first row. Later rows are never consulted, so a column whose first
//! value is null is reported as a string even if every other row is
//! numeric. Every inferred column carries the `inferred` fidelity tag.

mod inference;
mod types;

pub use inference::{classify, infer_column_types};
pub use types::{ColumnType, EvidenceType, TypeFidelity};
