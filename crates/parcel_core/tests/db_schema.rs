use parcel_core::db::schema::ensure_schema;
use parcel_core::db::{open_db, open_db_in_memory};
use parcel_core::{Parcel, ParcelRepository, SqliteParcelRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_parcel_table() {
    let conn = open_db_in_memory().unwrap();

    assert_table_exists(&conn, "parcel");
    assert_eq!(
        column_names(&conn),
        ["number", "client", "status", "address", "created_at"]
    );
}

#[test]
fn ensure_schema_is_idempotent_and_keeps_rows() {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    {
        let repo = SqliteParcelRepository::try_new(&conn).unwrap();
        repo.add(&Parcel::new(1, "registered", "a", "2024-01-01T00:00:00Z"))
            .unwrap();
    }

    ensure_schema(&conn).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM parcel;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn reopening_file_database_preserves_parcels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");

    let number = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteParcelRepository::try_new(&conn).unwrap();
        repo.add(&Parcel::new(5, "sent", "depot", "2024-02-02T10:00:00Z"))
            .unwrap()
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let stored = repo.get(number).unwrap();
    assert_eq!(stored.status, "sent");
    assert_eq!(stored.address, "depot");
}

#[test]
fn open_db_fails_for_unreachable_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("tracker.db");

    assert!(open_db(path).is_err());
}

fn column_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("PRAGMA table_info(parcel);").unwrap();
    stmt.query_map([], |row| row.get(1))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
