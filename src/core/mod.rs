//! Output side of moodimport.
//!
//! - [`output`] - Format writers (CSV, JSON, JSONL) for [`NormalizedEntry`] lists
//!
//! [`NormalizedEntry`]: crate::entry::NormalizedEntry

pub mod output;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
