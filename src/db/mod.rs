/// Database module: a small key-value table holding the serialized board.
mod board;
mod kv;
mod migrations;

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub use board::{CREWS_KEY, PROJECTS_KEY, load_store, save_store};
pub use kv::delete_value;

/// Opens (or creates) the SQLite database and runs migrations.
pub fn init<P: AsRef<Path>>(db_path: P) -> Result<Connection> {
    let db_path = db_path.as_ref();
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}
