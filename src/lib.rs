//! # moodimport
//!
//! Tolerant importer for hand-edited mood journal exports.
//!
//! ## Overview
//!
//! Journals kept in a spreadsheet or a text editor rarely follow a schema.
//! moodimport reads them anyway:
//! - **Dates** in three dialects: `15/01/2024`, `2024-01-15` and
//!   `lundi 15 janvier 2024`
//! - **Multi-line comments**: lines without a leading date continue the
//!   previous entry's comment
//! - **Quoted fields** that contain the delimiter
//! - **Broken lines** recovered by repair mode, which looks for a date and a
//!   score anywhere in the line
//!
//! Nothing a single line does stops an import. Every problem is reported as
//! an [`ImportDiagnostic`](pipeline::ImportDiagnostic) with its line number.
//!
//! ## Quick Start
//!
//! ```rust
//! use moodimport::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let document = "date,score,sommeil,medicament,emotions,commentaire\n\
//!                 2024-01-15,7,8.5,0,calme,Bonne journée\n\
//!                 suite du commentaire\n\
//!                 lundi 16 janvier 2024,85,6,0,joie;fatigue,\"Bonjour, ça va\"\n";
//!
//! let gateway = MemoryGateway::new();
//! let outcome = run_import(document, &ImportConfig::default(), &gateway).await?;
//!
//! if let ImportOutcome::Imported(result) = outcome {
//!     assert_eq!(result.imported_count, 2);
//!     assert_eq!(result.failed_count, 0);
//! }
//! assert_eq!(gateway.entries()[1].mood, 9);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - Leaf components
//!   - [`DateParser`](parsing::DateParser), [`LineClassifier`](parsing::LineClassifier),
//!     [`RecordParser`](parsing::RecordParser)
//! - [`pipeline`] - [`ImportPipeline`](pipeline::ImportPipeline), [`run_import`](pipeline::run_import)
//!   and the report types
//! - [`gateway`] - [`PersistenceGateway`](gateway::PersistenceGateway) and
//!   [`MemoryGateway`](gateway::MemoryGateway)
//! - [`entry`] - [`NormalizedEntry`]
//! - [`config`] - [`ImportConfig`](config::ImportConfig)
//! - [`core`] - Output writers (CSV, JSON, JSONL)
//! - [`format`] - [`OutputFormat`](format::OutputFormat)
//! - [`error`] - [`MoodImportError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod entry;
pub mod error;
pub mod format;
pub mod gateway;
#[cfg(feature = "cli")]
pub mod logging;
pub mod parsing;
pub mod pipeline;

// Re-export the main types at the crate root for convenience
pub use entry::NormalizedEntry;
pub use error::{GatewayError, MoodImportError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use moodimport::prelude::*;
/// ```
pub mod prelude {
    // Core entry type
    pub use crate::NormalizedEntry;

    // Error types
    pub use crate::error::{GatewayError, MoodImportError, Result};

    // Configuration
    pub use crate::config::ImportConfig;

    // Parsing building blocks
    pub use crate::parsing::{CandidateRecord, DateParser, LineClassifier, RecordParser};

    // Pipeline and reports
    pub use crate::pipeline::{
        DiagnosticKind, ImportDiagnostic, ImportOutcome, ImportPipeline, ImportPreview,
        ImportResult, ImportSummary, PreviewRecord, run_import,
    };

    // Persistence
    pub use crate::gateway::{EntryId, MemoryGateway, PersistenceGateway, UserRecord};

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    // Output formats
    pub use crate::format::OutputFormat;
}
