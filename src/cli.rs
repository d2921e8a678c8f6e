//! Command-line interface definition using clap.
//!
//! [`Args`] holds the parsed flags. [`Args::apply_to`] lays them over an
//! [`ImportConfig`] loaded from a file (or the defaults), so that flags
//! always win.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ImportConfig;

/// Default output path; its extension follows `--format`.
pub const DEFAULT_OUTPUT: &str = "moods.csv";

/// Import a hand-edited mood journal export and report what could not be read.
#[derive(Parser, Debug, Clone)]
#[command(name = "moodimport")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    moodimport journal.csv
    moodimport journal.csv --preview
    moodimport journal.txt -d ';' -o moods.jsonl -f jsonl
    moodimport journal.csv --config import.toml --report-json")]
pub struct Args {
    /// Path to the exported journal
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Field delimiter (a single character, or "tab")
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Treat the first line as data instead of a header
    #[arg(long)]
    pub no_header: bool,

    /// Reject lines with fewer than two fields instead of recovering them
    #[arg(long)]
    pub no_repair: bool,

    /// Show what would be imported without writing anything
    #[arg(long)]
    pub preview: bool,

    /// Email of the user the entries belong to
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Maximum number of diagnostics to print
    #[arg(long, value_name = "N")]
    pub max_errors: Option<usize>,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,

    /// Print the report as JSON on stdout
    #[arg(long)]
    pub report_json: bool,
}

impl Args {
    /// Overrides `config` with every flag given on the command line.
    pub fn apply_to(&self, mut config: ImportConfig) -> ImportConfig {
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if self.no_header {
            config.skip_header_line = false;
        }
        if self.no_repair {
            config.repair_mode = false;
        }
        if self.preview {
            config.preview_only = true;
        }
        if let Some(email) = &self.email {
            config.user_email.clone_from(email);
        }
        if let Some(max) = self.max_errors {
            config.max_reported_diagnostics = max;
        }
        config
    }

    /// Output path with the extension of the chosen format when the
    /// default path is in use.
    pub fn output_path(&self) -> String {
        if self.output != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        let format: crate::format::OutputFormat = self.format.into();
        format!("moods.{}", format.extension())
    }
}

fn parse_delimiter(s: &str) -> Result<char, String> {
    if s.eq_ignore_ascii_case("tab") || s == "\\t" {
        return Ok('\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("delimiter must be a single character, got '{s}'")),
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV, readable again by moodimport (default)
    #[default]
    Csv,

    /// JSON array of entries
    Json,

    /// JSON Lines - one entry per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("moodimport").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["journal.csv"]);
        assert_eq!(args.input, "journal.csv");
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(args.output_path(), "moods.csv");
        assert_eq!(args.apply_to(ImportConfig::default()), ImportConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "journal.csv",
            "-d",
            ";",
            "--no-header",
            "--no-repair",
            "--preview",
            "--email",
            "me@example.org",
            "--max-errors",
            "3",
        ]);
        let config = args.apply_to(ImportConfig::default().with_delimiter('|'));

        assert_eq!(config.delimiter, ';');
        assert!(!config.skip_header_line);
        assert!(!config.repair_mode);
        assert!(config.preview_only);
        assert_eq!(config.user_email, "me@example.org");
        assert_eq!(config.max_reported_diagnostics, 3);
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let args = parse(&["journal.csv"]);
        let config = args.apply_to(ImportConfig::default().with_delimiter('|'));
        assert_eq!(config.delimiter, '|');
    }

    #[test]
    fn test_delimiter_parsing() {
        assert_eq!(parse_delimiter(";"), Ok(';'));
        assert_eq!(parse_delimiter("tab"), Ok('\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_output_path_follows_format() {
        assert_eq!(parse(&["in.csv", "-f", "jsonl"]).output_path(), "moods.jsonl");
        assert_eq!(parse(&["in.csv", "-f", "json", "-o", "x.out"]).output_path(), "x.out");
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
    }
}
