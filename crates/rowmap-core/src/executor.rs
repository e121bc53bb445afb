//! Storage executor seam
//!
//! The mapper never talks to a driver directly. It issues positional
//! parameterized statements through this trait; `rowmap-store` provides
//! the SQLite implementation.

use crate::errors::Result;
use crate::value::{RawRow, SqlValue};

/// Minimal statement runner consumed by the mapper
///
/// Implementations run every mutating statement in autocommit mode and
/// report failures as `ExErrorKind::Persistence`.
pub trait SqlExecutor {
    /// Run a DDL or data-modification statement, returning affected rows
    fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<usize>;

    /// Run a read statement, returning rows in storage order
    fn execute_query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<RawRow>>;

    /// Identifier generated by the most recent INSERT on this connection
    fn last_inserted_id(&self) -> Result<i64>;
}

impl<X: SqlExecutor + ?Sized> SqlExecutor for &X {
    fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<usize> {
        (**self).execute(sql, params)
    }

    fn execute_query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<RawRow>> {
        (**self).execute_query(sql, params)
    }

    fn last_inserted_id(&self) -> Result<i64> {
        (**self).last_inserted_id()
    }
}
