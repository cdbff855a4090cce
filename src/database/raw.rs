// Untyped column holders and the row cursor abstraction

use rusqlite::types::ValueRef;
use rusqlite::Row;
use serde::Serialize;

/// One column value as read from the driver, before any coercion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Short name of the storage class, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Integer(_) => "integer",
            RawValue::Real(_) => "real",
            RawValue::Text(_) => "text",
            RawValue::Blob(_) => "blob",
        }
    }
}

impl From<ValueRef<'_>> for RawValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => RawValue::Null,
            ValueRef::Integer(i) => RawValue::Integer(i),
            ValueRef::Real(f) => RawValue::Real(f),
            // SQLite TEXT may hold any bytes; keep them intact when they are not UTF-8
            ValueRef::Text(bytes) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => RawValue::Text(text),
                Err(e) => RawValue::Blob(e.into_bytes()),
            },
            ValueRef::Blob(bytes) => RawValue::Blob(bytes.to_vec()),
        }
    }
}

/// A cursor positioned on one unread record
///
/// `scan_raw` reads exactly `count` columns or fails. Implementations must
/// not hand back partial rows.
pub trait RowSource {
    type Error;

    fn scan_raw(&self, count: usize) -> Result<Vec<RawValue>, Self::Error>;
}

impl RowSource for Row<'_> {
    type Error = rusqlite::Error;

    /// Fails with `InvalidColumnIndex(count)` when `count` differs from the
    /// statement's column count
    fn scan_raw(&self, count: usize) -> Result<Vec<RawValue>, Self::Error> {
        let stmt: &rusqlite::Statement<'_> = self.as_ref();
        let column_count = stmt.column_count();
        if count != column_count {
            return Err(rusqlite::Error::InvalidColumnIndex(count));
        }

        let mut values = Vec::with_capacity(count);
        for idx in 0..count {
            values.push(RawValue::from(self.get_ref(idx)?));
        }
        Ok(values)
    }
}
