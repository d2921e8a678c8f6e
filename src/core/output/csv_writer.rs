//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::entry::NormalizedEntry;
use crate::error::Result;

/// Column names, in the order the importer reads them back.
const HEADER: [&str; 6] = ["date", "mood", "sleep_hours", "medication", "emotions", "note"];

/// Writes entries to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `date`, `mood`, `sleep_hours`, `medication`, `emotions`, `note`
/// - Dates as `YYYY-MM-DD`, multi-line notes quoted
///
/// The file can be fed back to the importer with default settings.
pub fn write_csv(entries: &[NormalizedEntry], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    write_entries(entries, file)
}

/// Renders entries as a CSV string.
pub fn to_csv(entries: &[NormalizedEntry]) -> Result<String> {
    let mut buf = Vec::new();
    write_entries(entries, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_entries<W: Write>(entries: &[NormalizedEntry], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(out);
    writer.write_record(HEADER)?;

    for entry in entries {
        writer.write_record(build_record(entry))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_record(entry: &NormalizedEntry) -> [String; 6] {
    let number = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    [
        entry.timestamp.format("%Y-%m-%d").to_string(),
        entry.mood.to_string(),
        number(entry.sleep_hours),
        number(entry.medication),
        entry.tags.join(";"),
        entry.note.clone().unwrap_or_default(),
    ]
}
