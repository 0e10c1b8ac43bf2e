use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::RouteGraphError;

pub const SNAPSHOT_FORMAT: &str = "routegraph";
pub const SCHEMA_VERSION: i64 = 1;

pub fn ensure_schema(conn: &Connection) -> Result<(), RouteGraphError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS route_meta (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS route_adjacency (
            node     TEXT NOT NULL,
            neighbor TEXT NOT NULL,
            weight   INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_adjacency_node ON route_adjacency(node);
        "#,
    )
    .map_err(|e| RouteGraphError::persistence(e.to_string()))?;
    Ok(())
}

pub fn write_meta(conn: &Connection) -> Result<(), RouteGraphError> {
    let version = SCHEMA_VERSION.to_string();
    for (key, value) in [("format", SNAPSHOT_FORMAT), ("schema_version", version.as_str())] {
        conn.execute(
            "INSERT OR REPLACE INTO route_meta(key, value) VALUES(?1, ?2)",
            params![key, value],
        )
        .map_err(|e| RouteGraphError::persistence(e.to_string()))?;
    }
    Ok(())
}

/// Confirms the database was written by this crate with a schema it reads.
pub fn check_meta(conn: &Connection) -> Result<(), RouteGraphError> {
    let format = read_meta(conn, "format")?;
    if format.as_deref() != Some(SNAPSHOT_FORMAT) {
        return Err(RouteGraphError::persistence(format!(
            "not a route snapshot (format marker {format:?})"
        )));
    }
    let version = read_meta(conn, "schema_version")?;
    if version.as_deref() != Some(SCHEMA_VERSION.to_string().as_str()) {
        return Err(RouteGraphError::persistence(format!(
            "unsupported schema version {version:?}"
        )));
    }
    Ok(())
}

fn read_meta(conn: &Connection, key: &str) -> Result<Option<String>, RouteGraphError> {
    conn.query_row(
        "SELECT value FROM route_meta WHERE key=?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| RouteGraphError::persistence(e.to_string()))
}
