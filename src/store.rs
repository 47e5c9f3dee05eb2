use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::model::{Career, CareerBlob};

/// Fixed key the whole career is stored under, same as the original tool
/// used in browser storage.
pub const CAREER_KEY: &str = "mallaData";

pub fn open_store(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join("malla.sqlite3");
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT
        )",
        [],
    )?;

    Ok(conn)
}

pub fn kv_get(conn: &Connection, key: &str) -> anyhow::Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

pub fn kv_set(conn: &Connection, key: &str, value: &str) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value, updated_at) VALUES(?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        (key, value, chrono::Utc::now().to_rfc3339()),
    )?;
    Ok(())
}

/// A missing or unreadable blob means "no curriculum yet", never an error to
/// surface; the frontend shows the setup flow instead.
pub fn load_career(conn: &Connection) -> anyhow::Result<Option<Career>> {
    let Some(raw) = kv_get(conn, CAREER_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str::<CareerBlob>(&raw) {
        Ok(blob) => Ok(Some(Career::hydrate(&blob))),
        Err(e) => {
            tracing::warn!(error = %e, "stored curriculum is unreadable, treating as absent");
            Ok(None)
        }
    }
}

pub fn save_career(conn: &Connection, career: &Career) -> anyhow::Result<()> {
    let raw = serde_json::to_string(&career.serialize())?;
    kv_set(conn, CAREER_KEY, &raw)
}
