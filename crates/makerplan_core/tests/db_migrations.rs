use makerplan_core::db::migrations::latest_version;
use makerplan_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "project");
    assert_table_exists(&conn, "material");
    assert_table_exists(&conn, "step");
    assert_table_exists(&conn, "category");
    assert_table_exists(&conn, "project_category");
    assert_index_exists(&conn, "idx_material_project");
    assert_index_exists(&conn, "idx_step_project");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("makerplan.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "project");
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
        DbError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn open_db_enforces_foreign_keys() {
    let conn = open_db_in_memory().unwrap();

    let pragma: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(pragma, 1);

    let orphan = conn.execute(
        "INSERT INTO material (project_id, material_name)
         VALUES (?1, ?2);",
        params![999, "orphan part"],
    );
    assert!(orphan.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
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

fn assert_index_exists(conn: &Connection, index_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'index' AND name = ?1
            );",
            [index_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "index {index_name} does not exist");
}
