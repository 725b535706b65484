//! `parcel` table setup.
//!
//! # Invariants
//! - `ensure_schema` may run any number of times against the same database.
//! - `number` uses `AUTOINCREMENT`, so deleted identifiers are never reused.

use super::DbResult;
use rusqlite::Connection;

/// Table name shared by bootstrap and repository readiness checks.
pub const PARCEL_TABLE: &str = "parcel";

/// Columns every parcel repository expects to find.
pub const PARCEL_COLUMNS: [&str; 5] = ["number", "client", "status", "address", "created_at"];

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the `parcel` table and its client index when missing.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
