//! The import pipeline.
//!
//! One run goes through five steps:
//!
//! 1. split the document into non-blank lines and drop the header
//! 2. classify each line and build records, folding continuation lines
//!    into the current record's comment
//! 3. finalize the last record
//! 4. resolve every record's date and build [`NormalizedEntry`] values
//! 5. hand the entries to a [`PersistenceGateway`] one at a time
//!
//! Steps 1 to 4 are pure. Nothing a single line or record does can abort a
//! run: every problem becomes an [`ImportDiagnostic`] and the run goes on.
//!
//! # Example
//!
//! ```rust,no_run
//! use moodimport::prelude::*;
//!
//! # async fn example() -> moodimport::Result<()> {
//! let gateway = MemoryGateway::new();
//! let config = ImportConfig::default();
//! let document = "date,score,sommeil,medicament,emotions,commentaire\n\
//!                 2024-01-15,7,8.5,0,calme,Bonne journée\n";
//!
//! let result = ImportPipeline::new(config).import(document, &gateway).await?;
//! assert_eq!(result.imported_count, 1);
//! # Ok(())
//! # }
//! ```
//!
//! [`NormalizedEntry`]: crate::entry::NormalizedEntry

mod document;
mod report;
mod resolve;

pub use document::{ParsedDocument, RawLine, group_records, raw_lines};
pub use report::{
    DiagnosticKind, ImportDiagnostic, ImportPreview, ImportResult, ImportSummary, PreviewRecord,
};
pub use resolve::{ResolvedBatch, ResolvedEntry, normalize_score, split_tags};

use serde::Serialize;

use crate::config::ImportConfig;
use crate::error::Result;
use crate::gateway::PersistenceGateway;
use crate::parsing::{DateParser, LineClassifier, RecordParser};

use report::truncate_chars;

/// What [`run_import`] produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ImportOutcome {
    Imported(ImportResult),
    Preview(ImportPreview),
}

/// Imports `document` or previews it, depending on `config.preview_only`.
///
/// # Errors
///
/// Fails only if the configuration is invalid or the user cannot be
/// obtained from the gateway. Bad lines and failed inserts are reported in
/// the result instead.
pub async fn run_import(
    document: &str,
    config: &ImportConfig,
    gateway: &dyn PersistenceGateway,
) -> Result<ImportOutcome> {
    let pipeline = ImportPipeline::new(config.clone());
    if config.preview_only {
        pipeline.preview(document).map(ImportOutcome::Preview)
    } else {
        pipeline
            .import(document, gateway)
            .await
            .map(ImportOutcome::Imported)
    }
}

/// Drives parsing, date resolution and persistence for one document.
///
/// The pipeline holds no state between runs.
#[derive(Debug, Clone)]
pub struct ImportPipeline {
    config: ImportConfig,
    dates: DateParser,
    classifier: LineClassifier,
    records: RecordParser,
}

impl ImportPipeline {
    /// Creates a pipeline with the French date vocabulary.
    pub fn new(config: ImportConfig) -> Self {
        Self::with_date_parser(config, DateParser::new())
    }

    /// Creates a pipeline using `dates` for classification, repair and
    /// resolution.
    pub fn with_date_parser(config: ImportConfig, dates: DateParser) -> Self {
        Self {
            classifier: LineClassifier::new(dates.clone()),
            records: RecordParser::new(dates.clone(), config.repair_mode),
            dates,
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Steps 1 to 3: groups the document into candidate records.
    pub fn parse_document(&self, document: &str) -> ParsedDocument {
        let lines = raw_lines(document, self.config.skip_header_line);
        group_records(&lines, &self.classifier, &self.records, self.config.delimiter)
    }

    /// Step 4: resolves dates and builds entries owned by `user_id`.
    pub fn resolve(&self, parsed: &ParsedDocument, user_id: i64) -> ResolvedBatch {
        resolve::resolve_all(&parsed.candidates, &self.dates, user_id)
    }

    /// Parses and resolves without touching persistence.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn preview(&self, document: &str) -> Result<ImportPreview> {
        self.config.validate()?;

        let parsed = self.parse_document(document);
        let batch = self.resolve(&parsed, 0);

        let sample = parsed
            .candidates
            .iter()
            .take(self.config.preview_limit)
            .map(|record| {
                let date = batch
                    .entries
                    .iter()
                    .find(|e| e.line_number == record.start_line)
                    .map(|e| e.entry.timestamp.date_naive());
                PreviewRecord {
                    date,
                    date_token: record.date_token.clone(),
                    score: record.score,
                    mood: normalize_score(record.score),
                    comment: truncate_chars(&record.comment, self.config.preview_comment_chars),
                    line_number: record.start_line,
                }
            })
            .collect();

        let mut diagnostics = parsed.diagnostics;
        diagnostics.extend(batch.diagnostics);
        diagnostics.sort_by_key(|d| d.line_number);

        Ok(ImportPreview {
            total_lines: parsed.data_lines,
            records_found: parsed.candidates.len(),
            sample,
            diagnostics,
        })
    }

    /// Runs all five steps, inserting entries through `gateway`.
    ///
    /// Entries are inserted one after the other. A failed insert becomes a
    /// diagnostic and never undoes the inserts before it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or
    /// [`PersistenceGateway::ensure_user`] fails.
    pub async fn import(
        &self,
        document: &str,
        gateway: &dyn PersistenceGateway,
    ) -> Result<ImportResult> {
        self.config.validate()?;

        let user = gateway.ensure_user(&self.config.user_email).await?;
        let parsed = self.parse_document(document);
        let batch = self.resolve(&parsed, user.id);

        let mut result = ImportResult {
            total_records: batch.total_records,
            failed_count: batch.diagnostics.len(),
            ..ImportResult::default()
        };
        let mut diagnostics = parsed.diagnostics;
        diagnostics.extend(batch.diagnostics);

        for resolved in &batch.entries {
            match gateway.insert_mood_entry(&resolved.entry).await {
                Ok(_) => result.imported_count += 1,
                Err(err) => {
                    tracing::warn!(
                        line = resolved.line_number,
                        token = %resolved.date_token,
                        error = %err,
                        "failed to store entry"
                    );
                    result.failed_count += 1;
                    diagnostics.push(ImportDiagnostic::new(
                        resolved.line_number,
                        DiagnosticKind::PersistenceFailure,
                        format!("entry '{}' could not be stored: {err}", resolved.date_token),
                    ));
                }
            }
        }

        diagnostics.sort_by_key(|d| d.line_number);
        result.diagnostics = diagnostics;

        tracing::info!(
            imported = result.imported_count,
            failed = result.failed_count,
            total = result.total_records,
            diagnostics = result.diagnostics.len(),
            "import finished"
        );
        Ok(result)
    }
}

impl Default for ImportPipeline {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}
