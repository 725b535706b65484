use parcel_core::db::{open_db, open_db_in_memory};
use parcel_core::{Parcel, ParcelRepository, RepoError, SqliteParcelRepository};
use rusqlite::Connection;
use std::collections::HashMap;

fn test_parcel() -> Parcel {
    Parcel::new(1000, "registered", "test", "2024-01-01T00:00:00Z")
}

#[test]
fn add_get_delete_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let parcel = test_parcel();

    let number = repo.add(&parcel).unwrap();
    assert_ne!(number, 0);

    let stored = repo.get(number).unwrap();
    assert_eq!(stored.number, number);
    assert_eq!(stored.client, parcel.client);
    assert_eq!(stored.status, parcel.status);
    assert_eq!(stored.address, parcel.address);
    assert_eq!(stored.created_at, parcel.created_at);

    repo.delete(number).unwrap();

    let err = repo.get(number).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == number));
    assert_eq!(repo.get(number).unwrap_or_default().number, 0);
}

#[test]
fn add_ignores_caller_supplied_number() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let mut parcel = test_parcel();
    parcel.number = 424_242;
    let number = repo.add(&parcel).unwrap();

    assert_ne!(number, 424_242);
    assert!(matches!(repo.get(424_242), Err(RepoError::NotFound(_))));
}

#[test]
fn set_address_changes_only_address() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let parcel = test_parcel();
    let number = repo.add(&parcel).unwrap();

    repo.set_address(number, "new test address").unwrap();

    let stored = repo.get(number).unwrap();
    assert_eq!(stored.address, "new test address");
    assert_eq!(stored.client, parcel.client);
    assert_eq!(stored.status, parcel.status);
    assert_eq!(stored.created_at, parcel.created_at);
}

#[test]
fn set_status_accepts_any_label_and_changes_only_status() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let parcel = test_parcel();
    let number = repo.add(&parcel).unwrap();

    repo.set_status(number, "new test status").unwrap();

    let stored = repo.get(number).unwrap();
    assert_eq!(stored.status, "new test status");
    assert_eq!(stored.client, parcel.client);
    assert_eq!(stored.address, parcel.address);
    assert_eq!(stored.created_at, parcel.created_at);
}

#[test]
fn writes_on_missing_parcel_are_noops() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    let number = repo.add(&test_parcel()).unwrap();

    repo.set_address(number + 1, "nowhere").unwrap();
    repo.set_status(number + 1, "sent").unwrap();
    repo.delete(number + 1).unwrap();

    let stored = repo.get(number).unwrap();
    assert_eq!(stored.address, "test");
    assert_eq!(stored.status, "registered");
}

#[test]
fn get_by_client_returns_exactly_that_clients_parcels() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let client = 7_654_321;
    let mut expected = HashMap::new();
    for address in ["first", "second", "third"] {
        let mut parcel = test_parcel();
        parcel.client = client;
        parcel.address = address.to_string();
        parcel.number = repo.add(&parcel).unwrap();
        assert_ne!(parcel.number, 0);
        expected.insert(parcel.number, parcel);
    }
    repo.add(&test_parcel()).unwrap();

    let stored = repo.get_by_client(client).unwrap();
    assert_eq!(stored.len(), expected.len());
    for parcel in stored {
        let added = expected.get(&parcel.number).unwrap();
        assert_eq!(&parcel, added);
    }
}

#[test]
fn get_by_client_without_parcels_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    repo.add(&test_parcel()).unwrap();

    assert!(repo.get_by_client(1).unwrap().is_empty());
}

#[test]
fn deleted_numbers_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let first = repo.add(&test_parcel()).unwrap();
    repo.delete(first).unwrap();
    let second = repo.add(&test_parcel()).unwrap();

    assert!(second > first);
}

#[test]
fn register_send_delete_scenario_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("tracker.db")).unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();

    let number = repo.add(&test_parcel()).unwrap();
    assert_ne!(number, 0);

    repo.set_status(number, "sent").unwrap();
    assert_eq!(repo.get(number).unwrap().status, "sent");

    repo.delete(number).unwrap();
    assert!(repo.get(number).is_err());
}

#[test]
fn sqlite_failures_surface_as_db_errors() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteParcelRepository::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE parcel;").unwrap();

    assert!(matches!(repo.add(&test_parcel()), Err(RepoError::Db(_))));
    let err = repo.get(1).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(matches!(repo.get_by_client(1000), Err(RepoError::Db(_))));
}

#[test]
fn repository_rejects_connection_without_parcel_table() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteParcelRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("parcel"))
    ));
}

#[test]
fn repository_rejects_parcel_table_missing_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE parcel (
            number INTEGER PRIMARY KEY AUTOINCREMENT,
            client INTEGER NOT NULL,
            status TEXT NOT NULL,
            address TEXT NOT NULL
        );",
    )
    .unwrap();

    let result = SqliteParcelRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "parcel",
            column: "created_at"
        })
    ));
}
