use bookledger_core::db::migrations::latest_version;
use bookledger_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "books");
}

#[test]
fn reopening_file_database_is_idempotent_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.db");

    let conn = open_db(&path).unwrap();
    conn.execute(
        "INSERT INTO books (title, author, book_id) VALUES ('Emma', 'Austen', 1);",
        [],
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn books_table_enforces_unique_id_and_non_blank_title() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO books (title, author, book_id) VALUES ('Emma', 'Austen', 1);",
        [],
    )
    .unwrap();

    assert!(conn
        .execute(
            "INSERT INTO books (title, author, book_id) VALUES ('Dune', 'Herbert', 1);",
            [],
        )
        .is_err());
    assert!(conn
        .execute(
            "INSERT INTO books (title, author, book_id) VALUES ('  ', 'Nobody', 2);",
            [],
        )
        .is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "expected table `{table}` to exist");
}
