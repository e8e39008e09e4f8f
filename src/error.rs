//! Error types for record conversion and JSON projection.
//!
//! Parsing and generation are total: malformed rows are repaired and malformed
//! sidecar annotations are dropped, so neither ever returns an error. Errors
//! only come out of the conversion layer and the JSON projection helpers.
//!
//! ## Error Categories
//!
//! - **Validation failures**: one or more rows could not be converted into
//!   records. All rows are scanned first; the failure lists every problem.
//! - **Invalid shapes**: the record shape handed to the conversion layer is
//!   not a usable record definition. Reported before any row is looked at.
//! - **JSON errors**: the structured projection could not be serialized.
//!
//! ## Examples
//!
//! ```rust
//! use md_spreadsheet_parser::{parse_table, Error, FieldDescriptor, FieldType, RecordShape};
//!
//! let table = parse_table("| Score |\n|---|\n| ten |");
//! let shape = RecordShape::new("Entry", vec![FieldDescriptor::new("score", FieldType::Integer)]);
//!
//! match table.validate(&shape, &Default::default()) {
//!     Err(Error::Validation(failure)) => {
//!         assert_eq!(failure.len(), 1);
//!         assert!(failure.to_string().contains("Row 1: Column 'score'"));
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// One or more rows failed conversion
    #[error("{0}")]
    Validation(ValidationFailure),

    /// The record shape is not a valid record definition
    #[error("Invalid record shape: {0}")]
    InvalidShape(String),

    /// JSON projection failure
    #[error("JSON error: {0}")]
    Json(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid shape error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use md_spreadsheet_parser::Error;
    ///
    /// let err = Error::invalid_shape("record has no fields");
    /// assert!(err.to_string().contains("no fields"));
    /// ```
    pub fn invalid_shape<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidShape(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the aggregated row errors if this is a validation failure.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            Error::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<ValidationFailure> for Error {
    fn from(failure: ValidationFailure) -> Self {
        Error::Validation(failure)
    }
}

/// A single conversion problem, located by row and (optionally) column.
///
/// `row` is 1-based. Table-level problems such as a missing header row carry
/// no row at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: Option<usize>,
    pub column: Option<String>,
    pub message: String,
}

impl RowError {
    pub fn table(message: impl Into<String>) -> Self {
        RowError {
            row: None,
            column: None,
            message: message.into(),
        }
    }

    pub fn row(row: usize, message: impl Into<String>) -> Self {
        RowError {
            row: Some(row),
            column: None,
            message: message.into(),
        }
    }

    pub fn cell(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        RowError {
            row: Some(row),
            column: Some(column.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(row) = self.row {
            write!(f, "Row {}: ", row)?;
        }
        if let Some(column) = &self.column {
            write!(f, "Column '{}': ", column)?;
        }
        write!(f, "{}", self.message)
    }
}

/// Every row-level error collected while validating one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    errors: Vec<RowError>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<RowError>) -> Self {
        ValidationFailure { errors }
    }

    #[must_use]
    pub fn errors(&self) -> &[RowError] {
        &self.errors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} errors:", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

pub type Result<T> = std::result::Result<T, Error>;
