use thiserror::Error;

use super::kind::TypeDescriptor;
use crate::config::ConfigError;

/// Failure to coerce one raw column value into its destination
#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
    #[error("cannot convert {from} into {to}")]
    Unsupported { from: &'static str, to: String },

    #[error("value {value} out of range for {to}")]
    OutOfRange { value: String, to: String },

    #[error("cannot parse {value:?} as {to}: {reason}")]
    Parse {
        value: String,
        to: String,
        reason: String,
    },

    #[error("NULL cannot be assigned to non-nullable {to}")]
    NullIntoValue { to: String },

    #[error("destination is {actual} but column metadata says {expected}")]
    Mismatch {
        expected: TypeDescriptor,
        actual: TypeDescriptor,
    },
}

/// Failure of a single `scan_row` call
#[derive(Debug, Error)]
pub enum ScanError<E> {
    /// The cursor could not produce the row; nothing was assigned
    #[error("row read failed: {0}")]
    Read(E),

    /// The cursor returned a different number of values than requested
    #[error("row source returned {actual} value(s) for {expected} destination(s)")]
    ColumnCount { expected: usize, actual: usize },

    #[error("column {column}: {source}")]
    Convert {
        column: usize,
        #[source]
        source: ConvertError,
    },
}

impl<E> ScanError<E> {
    /// The driver error if the read itself failed
    pub fn into_read(self) -> Option<E> {
        match self {
            ScanError::Read(e) => Some(e),
            ScanError::ColumnCount { .. } | ScanError::Convert { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError<rusqlite::Error>),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
