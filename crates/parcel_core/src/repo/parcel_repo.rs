//! Parcel store contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate parcel operations into single statements on the `parcel` table.
//! - Map rows back into `Parcel` records.
//!
//! # Invariants
//! - Every operation issues exactly one statement; there is no batching,
//!   caching or retry.
//! - `status` is stored and returned verbatim. No lifecycle rules apply here.
//! - Updates and deletes that match no row succeed silently.
//! - `get` reports missing rows as `RepoError::NotFound`, distinct from
//!   SQLite failures. Callers that rely on the zero-value record use
//!   `unwrap_or_default()`.

use crate::db::schema::{PARCEL_COLUMNS, PARCEL_TABLE};
use crate::db::DbError;
use crate::model::parcel::{ClientId, Parcel, ParcelNumber};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcel";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for parcel persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite failure, surfaced unmodified.
    Db(DbError),
    /// No row carries the requested parcel number.
    NotFound(ParcelNumber),
    /// Connection does not expose the `parcel` table.
    MissingRequiredTable(&'static str),
    /// `parcel` table lacks an expected column.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "parcel repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "parcel repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Parcel store operations.
pub trait ParcelRepository {
    /// Inserts a parcel, ignoring `parcel.number`, and returns the assigned number.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    /// Loads one parcel by number.
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Lists every parcel owned by `client`. Order is unspecified.
    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>>;
    /// Replaces the delivery address.
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    /// Replaces the status label.
    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()>;
    /// Removes the parcel row.
    fn delete(&self, number: ParcelNumber) -> RepoResult<()>;
}

/// SQLite-backed parcel store.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    /// Wraps a connection whose `parcel` table is already in place.
    ///
    /// Only inspects the schema; the connection is never reconfigured.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_parcel_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        self.conn.execute(
            "INSERT INTO parcel (client, status, address, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                parcel.client,
                parcel.status.as_str(),
                parcel.address.as_str(),
                parcel.created_at.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        let parcel = self
            .conn
            .query_row(
                &format!("{PARCEL_SELECT_SQL} WHERE number = ?1;"),
                [number],
                parse_parcel_row,
            )
            .optional()?;

        parcel.ok_or(RepoError::NotFound(number))
    }

    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE client = ?1;"))?;
        let parcels = stmt
            .query_map([client], parse_parcel_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(parcels)
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE parcel SET address = ?1 WHERE number = ?2;",
            params![address, number],
        )?;
        Ok(())
    }

    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE parcel SET status = ?1 WHERE number = ?2;",
            params![status, number],
        )?;
        Ok(())
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM parcel WHERE number = ?1;", [number])?;
        Ok(())
    }
}

fn parse_parcel_row(row: &Row<'_>) -> rusqlite::Result<Parcel> {
    Ok(Parcel {
        number: row.get("number")?,
        client: row.get("client")?,
        status: row.get("status")?,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}

fn ensure_parcel_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, PARCEL_TABLE)? {
        return Err(RepoError::MissingRequiredTable(PARCEL_TABLE));
    }

    for column in PARCEL_COLUMNS {
        if !table_has_column(conn, PARCEL_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: PARCEL_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
