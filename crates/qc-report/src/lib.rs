//! Report generation for measurement QC results.
//!
//! - **JSON**: the full result record, field names as persisted downstream
//! - **CSV**: one row per measurement verdict
//! - **Text**: a plain-text QC sheet for operators
//! - **Batch**: per-size pass/fail tallies across many runs

mod batch;
mod json;
mod text;
mod verdicts;

pub use batch::{BatchSummary, SizeTally, write_batch_csv};
pub use json::{to_json_string, write_json};
pub use text::render_text;
pub use verdicts::{VERDICT_COLUMNS, write_verdicts_csv};
