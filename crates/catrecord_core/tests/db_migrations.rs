use catrecord_core::db::migrations::latest_version;
use catrecord_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "cats");
    assert_index_exists(&conn, "idx_cats_name");
    assert_index_exists(&conn, "idx_cats_age");
}

#[test]
fn opening_same_database_twice_is_idempotent_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cats.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO cats (name, age) VALUES ('Leo', 3);", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM cats;", [], |row| row.get(0))
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
fn failed_schema_step_reports_its_version_and_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    // Pre-schema catalog without an `age` column; the age index cannot build.
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE cats (id INTEGER PRIMARY KEY, name TEXT NOT NULL);")
        .unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert_eq!(err.failed_migration(), Some(1));
    assert!(matches!(err, DbError::Migration { version: 1, .. }));
    assert!(err.to_string().contains("migration 1 failed"));

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 0);
    let index_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'idx_cats_name';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(index_count, 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert_schema_object(conn, "table", table_name);
}

fn assert_index_exists(conn: &Connection, index_name: &str) {
    assert_schema_object(conn, "index", index_name);
}

fn assert_schema_object(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}
