// osm - Column name resolution and typed row scanning for SQLite
//!
//! osm maps snake_case result columns onto camel-case record fields
//! (`user_id` → `UserId` or `UserID`) and scans rows into typed
//! destinations, coercing each SQLite value on the way.

pub mod config;
pub mod database;
pub mod logging;
pub mod naming;
pub mod utils;


// Re-export common types
pub use config::{LoggingConfig, OrmConfig};
pub use database::{
    find_field, scan_row, ColumnSlot, Database, DefaultConverter, Destination, FieldDescriptor,
    RawValue, Record, Slot, TypeDescriptor, ValueConverter, ValueKind,
};
pub use naming::{to_candidate_names, CandidateNames};
