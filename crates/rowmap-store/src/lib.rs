//! rowmap store - SQLite persistence for the rowmap mapper
//!
//! Provides:
//! - `SqliteExecutor`, the `SqlExecutor` implementation over rusqlite
//! - Connection management (`db`) driven by a TOML-loadable `StoreConfig`
//! - `open_department_mapper`, the one-call setup used by the CLI and tests

pub mod config;
pub mod db;
pub mod errors;
pub mod executor;

use rowmap_core::DepartmentMapper;

// Re-export key types
pub use config::{JournalMode, StoreConfig};
pub use errors::Result;
pub use executor::SqliteExecutor;

/// Open the store described by `config` and return a department mapper
/// over it, with the `departments` table created if absent
pub fn open_department_mapper(config: &StoreConfig) -> Result<DepartmentMapper<SqliteExecutor>> {
    let mapper = DepartmentMapper::new(SqliteExecutor::open(config)?);
    mapper.create_table()?;
    Ok(mapper)
}
