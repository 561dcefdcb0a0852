use crimenet_core::db::migrations::{latest_version, schema_version};
use crimenet_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().expect("open in-memory db");

    assert_eq!(schema_version(&conn).expect("read schema version"), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn reopening_a_database_file_keeps_entries() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("crimenet.sqlite3");

    let conn = open_db(&path).expect("open db");
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES ('cn_user', 'null');",
        [],
    )
    .expect("run sql");
    drop(conn);

    let conn = open_db(&path).expect("open db");
    assert_eq!(schema_version(&conn).expect("read schema version"), latest_version());
    let value: String = conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = 'cn_user';",
            [],
            |row| row.get(0),
        )
        .expect("query row");
    assert_eq!(value, "null");
}

#[test]
fn newer_schema_versions_are_refused() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).expect("open raw connection");
    conn.execute_batch("PRAGMA user_version = 42;").expect("run sql");
    drop(conn);

    match open_db(&path).expect_err("newer schema must be refused") {
        DbError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 42);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
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
        .expect("query row");
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
