//! osm's database module - column resolution and typed row scanning over SQLite
//!
//! The pieces compose as: result column names go through the resolver to find
//! record fields, each row is read into raw holders, and the converter writes
//! every non-NULL holder into its field.

use rusqlite::{Connection, Params};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::OrmConfig;

mod convert;
mod error;
mod kind;
mod raw;
mod resolver;
mod scan;
pub mod types;

pub use convert::{DefaultConverter, Destination, Slot, ValueConverter};
pub use error::{ConvertError, DatabaseError, Result, ScanError};
pub use kind::{is_value_kind, TypeDescriptor, ValueKind};
pub use raw::{RawValue, RowSource};
pub use resolver::{find_field, resolve_columns};
pub use scan::{scan_row, ColumnSlot};
pub use types::*;

/// A SQLite connection plus the converter used for every scan
pub struct Database {
    pub(crate) conn: Connection,
    pub(crate) file_path: Option<PathBuf>,
    converter: DefaultConverter,
}

impl Database {
    /// Open (or create) a database file
    pub fn open<P: AsRef<Path>>(db_path: P, config: &OrmConfig) -> Result<Self> {
        let file_path = db_path.as_ref().to_path_buf();
        info!("Opening SQLite database at: {}", file_path.display());

        let conn = Connection::open(&file_path)?;
        Self::configure(conn, Some(file_path), config)
    }

    /// Open a database file using the TOML config at `config_path`
    ///
    /// A missing config file means defaults; an unreadable or malformed one is
    /// `DatabaseError::Config`.
    pub fn open_with_config_file<P: AsRef<Path>, C: AsRef<Path>>(db_path: P, config_path: C) -> Result<Self> {
        let config = OrmConfig::load(config_path.as_ref())?;
        Self::open(db_path, &config)
    }

    pub fn open_in_memory(config: &OrmConfig) -> Result<Self> {
        debug!("Opening in-memory SQLite database");
        let conn = Connection::open_in_memory()?;
        Self::configure(conn, None, config)
    }

    fn configure(conn: Connection, file_path: Option<PathBuf>, config: &OrmConfig) -> Result<Self> {
        conn.busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))?;

        Ok(Self {
            conn,
            file_path,
            converter: config.converter(),
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn converter(&self) -> &DefaultConverter {
        &self.converter
    }

    /// Column names a statement would return
    pub fn columns(&self, sql: &str) -> Result<Vec<String>> {
        let stmt = self.conn.prepare(sql)?;
        Ok(stmt.column_names().into_iter().map(String::from).collect())
    }

    /// Run a query and scan every row into a new `R`
    ///
    /// Columns are resolved against `R::fields()` once per statement. Columns
    /// with no matching field are read and dropped; fields with no column or a
    /// NULL value keep their `Default` value.
    pub fn query_records<R: Record, P: Params>(&self, sql: &str, params: P) -> Result<Vec<R>> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let fields: HashMap<String, FieldDescriptor> = R::fields()
            .into_iter()
            .map(|field| (field.name.clone(), field))
            .collect();
        let bindings: Vec<Option<FieldDescriptor>> = resolve_columns(&fields, &columns)
            .into_iter()
            .map(|resolved| resolved.map(|(_, field)| field.clone()))
            .collect();
        debug!(
            "Resolved {}/{} columns to fields",
            bindings.iter().filter(|b| b.is_some()).count(),
            columns.len()
        );

        let mut rows = stmt.query(params)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = R::default();
            {
                let mut by_name: HashMap<&'static str, Destination<'_>> =
                    record.destinations().into_iter().collect();
                let mut slots: Vec<ColumnSlot<'_>> = bindings
                    .iter()
                    .map(|binding| {
                        binding
                            .as_ref()
                            .and_then(|field| {
                                by_name.remove(field.name.as_str()).map(|dest| {
                                    ColumnSlot::with_metadata(field.is_indirect(), field.ty.clone(), dest)
                                })
                            })
                            .unwrap_or_else(ColumnSlot::ignored)
                    })
                    .collect();
                scan_row(row, &mut slots, &self.converter)?;
            }
            records.push(record);
        }

        debug!("Scanned {} record(s)", records.len());
        Ok(records)
    }

    /// Scan the first row of a query into caller-supplied slots
    ///
    /// Returns `Ok(false)` and leaves the slots untouched when there is no row.
    pub fn query_row_into<P: Params>(&self, sql: &str, params: P, slots: &mut [ColumnSlot<'_>]) -> Result<bool> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        match rows.next()? {
            Some(row) => {
                scan_row(row, slots, &self.converter)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run a query and return column names plus every row as raw values
    pub fn query_raw<P: Params>(&self, sql: &str, params: P) -> Result<(Vec<String>, Vec<Vec<RawValue>>)> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params)?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            values.push(row.scan_raw(columns.len())?);
        }
        Ok((columns, values))
    }
}
