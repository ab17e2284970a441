/// Loading and saving the whole board under its two storage keys.
use anyhow::{Context, Result};
use log::{info, warn};
use rusqlite::Connection;

use super::kv::{get_value, set_value};
use crate::store::{Store, default_crews};
use crate::types::{Crew, Project};

pub const PROJECTS_KEY: &str = "crewboard_projects";
pub const CREWS_KEY: &str = "crewboard_crews";

/// Reads the board. A missing projects key means no projects; a missing
/// crews key means the default crews. Unparsable values are errors.
pub fn load_store(conn: &Connection) -> Result<Store> {
    let projects: Vec<Project> = match get_value(PROJECTS_KEY, conn)? {
        Some(json) => serde_json::from_str(&json)
            .with_context(|| format!("stored value under '{PROJECTS_KEY}' is not valid"))?,
        None => Vec::new(),
    };
    let crews: Vec<Crew> = match get_value(CREWS_KEY, conn)? {
        Some(json) => serde_json::from_str(&json)
            .with_context(|| format!("stored value under '{CREWS_KEY}' is not valid"))?,
        None => {
            warn!("event=store_seeded reason=missing_crews_key");
            default_crews()
        }
    };
    info!(
        "event=store_loaded projects={} crews={}",
        projects.len(),
        crews.len()
    );
    Ok(Store::new(projects, crews))
}

/// Writes both collections in a single transaction.
pub fn save_store(store: &Store, conn: &Connection) -> Result<()> {
    let projects = serde_json::to_string(store.projects())?;
    let crews = serde_json::to_string(store.crews())?;
    let tx = conn.unchecked_transaction()?;
    set_value(PROJECTS_KEY, &projects, &tx)?;
    set_value(CREWS_KEY, &crews, &tx)?;
    tx.commit()?;
    info!(
        "event=store_saved projects={} crews={}",
        store.projects().len(),
        store.crews().len()
    );
    Ok(())
}
