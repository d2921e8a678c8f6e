//! # moodimport CLI
//!
//! Command-line front-end for the moodimport library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use moodimport::cli::Args;
use moodimport::format::{OutputFormat, write_to_format};
use moodimport::logging;
use moodimport::prelude::*;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let base = match &args.config {
        Some(path) => ImportConfig::load(Path::new(path))?,
        None => ImportConfig::default(),
    };
    let config = args.apply_to(base);
    logging::init(args.debug, config.log_level.as_deref());
    config.validate()?;

    let output_path = args.output_path();
    let format: OutputFormat = args.format.into();
    let quiet = args.report_json;

    if !quiet {
        println!("📦 moodimport v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Input:     {}", args.input);
        if config.preview_only {
            println!("🔎 Mode:      Preview");
        } else {
            println!("💾 Output:    {}", output_path);
            println!("📄 Format:    {}", format);
        }
        println!("✂️  Delimiter: {:?}", config.delimiter);
        println!();
    }

    let document = String::from_utf8(std::fs::read(&args.input)?)?;
    let gateway = MemoryGateway::new();

    match run_import(&document, &config, &gateway).await? {
        ImportOutcome::Preview(preview) => {
            if quiet {
                println!("{}", serde_json::to_string_pretty(&preview)?);
            } else {
                print_preview(&preview, config.max_reported_diagnostics);
            }
        }
        ImportOutcome::Imported(result) => {
            let entries = gateway.entries();
            write_to_format(&entries, &output_path, format)?;

            let summary = result.summary(config.max_reported_diagnostics);
            if quiet {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
                println!();
                println!("✅ Done! Output saved to {}", output_path);
                println!(
                    "⚡ Total time: {:.2}s",
                    total_start.elapsed().as_secs_f64()
                );
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &ImportSummary) {
    println!("📊 Summary:");
    println!("   Records:   {}", summary.total_records);
    println!("   Imported:  {}", summary.imported_count);
    println!("   Failed:    {}", summary.failed_count);
    print_diagnostics(&summary.diagnostics, summary.omitted());
}

fn print_preview(preview: &ImportPreview, max_diagnostics: usize) {
    println!(
        "🔎 {} records found in {} lines",
        preview.records_found, preview.total_lines
    );
    for record in &preview.sample {
        let date = record
            .date
            .map_or_else(|| format!("?{}", record.date_token), |d| d.to_string());
        let comment = record.comment.replace('\n', " ⏎ ");
        println!(
            "   line {:<4} {:<12} mood {:>2}  {}",
            record.line_number, date, record.mood, comment
        );
    }
    let shown: Vec<ImportDiagnostic> = preview
        .diagnostics
        .iter()
        .take(max_diagnostics)
        .cloned()
        .collect();
    print_diagnostics(&shown, preview.diagnostics.len() - shown.len());
}

fn print_diagnostics(diagnostics: &[ImportDiagnostic], omitted: usize) {
    if diagnostics.is_empty() {
        return;
    }
    println!();
    println!("⚠️  Diagnostics:");
    for diagnostic in diagnostics {
        println!("   {}", diagnostic);
    }
    if omitted > 0 {
        println!("   ... and {} more", omitted);
    }
}
