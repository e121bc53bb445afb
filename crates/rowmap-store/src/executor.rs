//! SQLite implementation of the mapper's storage executor
//!
//! Runs every statement in autocommit mode, so each mutating statement is
//! committed as soon as it returns.

use rusqlite::types::{Type, Value, ValueRef};
use rusqlite::{params_from_iter, Connection};

use rowmap_core::{RawRow, SqlExecutor, SqlValue};

use crate::config::StoreConfig;
use crate::db;
use crate::errors::{from_rusqlite, Result};

fn to_sqlite(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(v) => Value::Integer(*v),
        SqlValue::Real(v) => Value::Real(*v),
        SqlValue::Text(v) => Value::Text(v.clone()),
    }
}

fn from_sqlite(idx: usize, value: ValueRef<'_>) -> rusqlite::Result<SqlValue> {
    Ok(match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(v) => SqlValue::Integer(v),
        ValueRef::Real(v) => SqlValue::Real(v),
        ValueRef::Text(bytes) => SqlValue::Text(
            std::str::from_utf8(bytes)
                .map_err(rusqlite::Error::Utf8Error)?
                .to_string(),
        ),
        ValueRef::Blob(_) => {
            return Err(rusqlite::Error::InvalidColumnType(
                idx,
                format!("column {}", idx),
                Type::Blob,
            ))
        }
    })
}

/// Storage executor over a single SQLite connection
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    /// Open and configure the database described by `config`
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = db::open_with(config)?;
        tracing::debug!(
            path = ?config.path,
            journal_mode = config.journal_mode.as_str(),
            "opened sqlite store"
        );
        Ok(Self { conn })
    }

    /// In-memory database with default settings
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Wrap an already configured connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl SqlExecutor for SqliteExecutor {
    fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<usize> {
        tracing::trace!(sql, params = params.len(), "execute");
        self.conn
            .execute(sql, params_from_iter(params.iter().map(to_sqlite)))
            .map_err(from_rusqlite)
    }

    fn execute_query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<RawRow>> {
        tracing::trace!(sql, params = params.len(), "execute_query");
        let mut stmt = self.conn.prepare_cached(sql).map_err(from_rusqlite)?;
        let width = stmt.column_count();

        let rows = stmt
            .query_map(params_from_iter(params.iter().map(to_sqlite)), |row| {
                (0..width)
                    .map(|idx| from_sqlite(idx, row.get_ref(idx)?))
                    .collect::<rusqlite::Result<RawRow>>()
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(rows)
    }

    fn last_inserted_id(&self) -> Result<i64> {
        Ok(self.conn.last_insert_rowid())
    }
}
