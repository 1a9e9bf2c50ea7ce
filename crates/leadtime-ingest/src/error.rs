//! Error types for shipment report ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort reading a shipment report.
///
/// Row-level problems (blank cells, unparseable dates) are not errors; they
/// surface as `None` fields on the record and are counted in
/// [`crate::IngestStats`].
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV structure.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// No header line or no rows at all.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Workbook could not be opened or its sheet could not be read.
    #[error("failed to read workbook {path}: {message}")]
    ExcelRead { path: PathBuf, message: String },

    /// Workbook without sheets, or whose sheet has no header row.
    #[error("workbook has no data: {path}")]
    EmptyWorkbook { path: PathBuf },

    /// A required column is absent from the header.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
