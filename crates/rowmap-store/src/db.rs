//! Database connection management

use crate::config::{JournalMode, StoreConfig};
use crate::errors::{from_rusqlite, io_error, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Open the database described by `config` and apply its settings
///
/// Creates the parent directory of a file-backed database if needed.
pub fn open_with(config: &StoreConfig) -> Result<Connection> {
    let conn = match &config.path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
            }
            open(path)?
        }
        None => open_in_memory()?,
    };
    configure(&conn, config)?;
    Ok(conn)
}

/// Configure a connection per `config`
///
/// Returns the journal mode SQLite actually settled on; in-memory
/// databases always report `memory`.
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<String> {
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(from_rusqlite)?;

    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", config.journal_mode.as_str(), |row| {
            row.get(0)
        })
        .map_err(from_rusqlite)?;

    if config.journal_mode != JournalMode::Memory && mode.eq_ignore_ascii_case("memory") {
        tracing::debug!(
            requested = config.journal_mode.as_str(),
            actual = %mode,
            "journal mode not applied to in-memory database"
        );
    }
    Ok(mode)
}
