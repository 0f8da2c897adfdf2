//! Row normalization
//!
//! Turns a raw resource collection into a [`RowBatch`]:
//!
//! 1. Flatten: nested objects and arrays become their compact JSON text,
//!    scalars pass through unchanged.
//! 2. Infer: column types come from the first flattened row only.
//! 3. Emit: empty collections produce no batch at all.
//!
//! A value nested deeper than [`MAX_NESTING_DEPTH`] cannot be flattened and
//! fails the whole batch.

mod batch;
mod flatten;
mod types;

pub use batch::{cache_content, Normalizer, RowBatch};
pub use flatten::{flatten_record, flatten_value, MAX_NESTING_DEPTH};
pub use types::{FieldValue, Row};
