//! Error types for workbook operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for workbook operations.
pub type WorkbookResult<T> = Result<T, WorkbookError>;

/// Errors that can occur while opening or reading a spreadsheet file.
///
/// Every variant's display string is suitable for returning to an MCP client
/// verbatim in the `error` field of a tool envelope.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// Path does not exist or is not a regular file.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// File extension outside the supported set.
    #[error(
        "Unsupported file format: '{extension}'. Only .xlsx and .xls files are supported"
    )]
    UnsupportedExtension {
        /// Path that was requested.
        path: PathBuf,
        /// The offending extension (may be empty).
        extension: String,
    },

    /// The file exists but cannot be parsed as a spreadsheet.
    #[error("Failed to open workbook {}: {source}", path.display())]
    Open {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying calamine error.
        #[source]
        source: calamine::Error,
    },

    /// The workbook parsed but contains no sheets.
    #[error("Workbook contains no sheets: {}", path.display())]
    NoSheets {
        /// Path that was opened.
        path: PathBuf,
    },

    /// Requested sheet name is absent from the workbook.
    #[error("Sheet '{requested}' not found. Available sheets: {}", available.join(", "))]
    SheetNotFound {
        /// The sheet name the caller asked for.
        requested: String,
        /// All sheet names present in the workbook, in workbook order.
        available: Vec<String>,
    },

    /// Requested column name is absent from the sheet's header row.
    #[error("Column '{requested}' not found. Available columns: {}", available.join(", "))]
    ColumnNotFound {
        /// The column name the caller asked for.
        requested: String,
        /// All column names in the sheet, in sheet order.
        available: Vec<String>,
    },

    /// A sheet exists but its cell data could not be read.
    #[error("Failed to read sheet '{name}': {source}")]
    SheetRead {
        /// Name of the sheet.
        name: String,
        /// Underlying calamine error.
        #[source]
        source: calamine::Error,
    },
}
