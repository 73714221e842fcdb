//! Pipeline error types.
//!
//! Only file-level problems are errors: a missing input file, an unreadable
//! file, or a header without a required column fails the whole run. Row- and
//! field-level data quality issues are handled by skipping and tallying in
//! [`crate::normalize::RunReport`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading an input file or writing an output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from an input file's header row.
    #[error("missing required column '{name}' in {}", path.display())]
    MissingColumn {
        /// The column name that could not be resolved.
        name: String,
        /// The input file whose header was scanned.
        path: PathBuf,
    },

    /// An input file contains no header row.
    #[error("input file is empty: {}", path.display())]
    EmptyFile {
        /// The offending input file.
        path: PathBuf,
    },
}
