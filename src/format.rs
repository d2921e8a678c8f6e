//! Output formats for imported entries.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> moodimport::Result<()> {
//! use chrono::{TimeZone, Utc};
//! use moodimport::format::{OutputFormat, write_to_format};
//! use moodimport::NormalizedEntry;
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
//! let entries = vec![NormalizedEntry::new(1, 7, ts)];
//!
//! let format = OutputFormat::from_path("entries.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! write_to_format(&entries, "entries.jsonl", format)?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::entry::NormalizedEntry;
use crate::error::{MoodImportError, Result};

/// Output format for imported entries.
///
/// ```rust
/// use moodimport::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("ndjson").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV that the importer reads back with default settings
    #[default]
    Csv,
    /// JSON array of entries
    Json,
    /// JSON Lines, one entry per line
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Detects the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`MoodImportError::InvalidConfig`] for unknown extensions.
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();
        ext.parse().map_err(|_| {
            MoodImportError::invalid_config(
                "output_format",
                format!("unknown file extension '.{ext}', expected one of: csv, json, jsonl"),
            )
        })
    }

    /// Name of the cargo feature this format needs.
    fn feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn feature_missing(format: OutputFormat) -> MoodImportError {
    MoodImportError::invalid_config(
        "output_format",
        format!("{format} output requires the '{}' feature", format.feature()),
    )
}

/// Writes entries to `path` in `format`.
///
/// # Errors
///
/// Returns an error if the file cannot be written or the format's feature
/// is disabled.
#[allow(unused_variables)]
pub fn write_to_format(entries: &[NormalizedEntry], path: &str, format: OutputFormat) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(entries, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(entries, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(entries, path),
        #[allow(unreachable_patterns)]
        _ => Err(feature_missing(format)),
    }
}

/// Renders entries as a string in `format`.
#[allow(unused_variables)]
pub fn to_format_string(entries: &[NormalizedEntry], format: OutputFormat) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(entries),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(entries),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(entries),
        #[allow(unreachable_patterns)]
        _ => Err(feature_missing(format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_str() {
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("ndjson").unwrap(), OutputFormat::Jsonl);
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_from_path() {
        assert_eq!(OutputFormat::from_path("out.csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path("a/b/out.JSONL").unwrap(), OutputFormat::Jsonl);
        assert!(OutputFormat::from_path("out.txt").unwrap_err().is_config());
    }

    #[test]
    fn test_display_and_extension() {
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_to_format_string() {
        use chrono::{TimeZone, Utc};

        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let entries = vec![NormalizedEntry::new(1, 7, ts)];

        let csv = to_format_string(&entries, OutputFormat::Csv).unwrap();
        assert!(csv.contains("2024-01-15,7"));
        let jsonl = to_format_string(&entries, OutputFormat::Jsonl).unwrap();
        assert_eq!(jsonl.lines().count(), 1);
    }
}
