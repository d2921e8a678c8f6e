//! JSON Lines (JSONL) output writer.
//!
//! One entry per line, convenient for appending to an existing log or for
//! streaming into another tool.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::entry::NormalizedEntry;
use crate::error::Result;

/// Writes entries to a JSONL file.
///
/// ```jsonl
/// {"user_id":1,"mood":7,"tags":[],"timestamp":"2024-01-15T00:00:00Z"}
/// {"user_id":1,"mood":5,"tags":["calme"],"timestamp":"2024-01-16T00:00:00Z"}
/// ```
pub fn write_jsonl(entries: &[NormalizedEntry], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(entries, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Renders entries as JSON Lines.
pub fn to_jsonl(entries: &[NormalizedEntry]) -> Result<String> {
    let mut buf = Vec::new();
    write_lines(entries, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_lines<W: Write>(entries: &[NormalizedEntry], out: &mut W) -> Result<()> {
    for entry in entries {
        let line = serde_json::to_string(entry)?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}
