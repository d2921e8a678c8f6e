//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::entry::NormalizedEntry;
use crate::error::Result;

/// Writes entries to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"user_id": 1, "mood": 7, "tags": ["calme"], "timestamp": "2024-01-15T00:00:00Z"}
/// ]
/// ```
pub fn write_json(entries: &[NormalizedEntry], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writer.flush()?;
    Ok(())
}

/// Renders entries as a pretty-printed JSON array.
pub fn to_json(entries: &[NormalizedEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_json_array() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let entries = vec![
            NormalizedEntry::new(1, 7, ts).with_note("Bonne journée"),
            NormalizedEntry::new(1, 3, ts),
        ];

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        write_json(&entries, path).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["note"], "Bonne journée");
        assert_eq!(parsed[0]["timestamp"], "2024-01-15T00:00:00Z");
        assert!(parsed[1].get("note").is_none());
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }
}
