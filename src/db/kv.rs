/// Key-value queries over the `kv` table.
use anyhow::Result;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension};

pub fn get_value(key: &str, conn: &Connection) -> Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

pub fn set_value(key: &str, value: &str, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        (key, value, Local::now().to_rfc3339()),
    )?;
    Ok(())
}

pub fn delete_value(key: &str, conn: &Connection) -> Result<bool> {
    let removed = conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
    Ok(removed > 0)
}
