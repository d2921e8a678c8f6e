//! Output format writers for imported entries.
//!
//! - [`write_csv`] / [`to_csv`] - CSV that the importer can read back - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of entries - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one entry per line - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> moodimport::Result<()> {
//! use chrono::{TimeZone, Utc};
//! use moodimport::core::output::{to_csv, write_json};
//! use moodimport::NormalizedEntry;
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
//! let entries = vec![NormalizedEntry::new(1, 7, ts).with_note("Bonne journée")];
//!
//! write_json(&entries, "entries.json")?;
//! let csv_string = to_csv(&entries)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
