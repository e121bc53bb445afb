//! Entity mapper
//!
//! Translates between one table's rows and handles to in-memory entities,
//! routing every load through an [`IdentityMap`] so that one row never has
//! two live representatives.
//!
//! Every public operation logs through the canonical macros:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Storage errors are returned exactly as the executor produced them.

use std::time::Instant;

use crate::entity::{Entity, Handle};
use crate::errors::{ExError, Result, RowMapError};
use crate::executor::SqlExecutor;
use crate::identity_map::IdentityMap;
use crate::model::Department;
use crate::sql::TableStatements;
use crate::types::schema::{CACHE_HIT, CACHE_MISS};
use crate::value::{RawRow, SqlValue};
use crate::{log_op_end, log_op_error, log_op_start};

/// Mapper for `departments`
pub type DepartmentMapper<X> = Mapper<Department, X>;

/// Single-row lookups issued through `find_first`
#[derive(Debug, Clone, Copy)]
enum Lookup {
    ById,
    ByName,
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Row-to-object mapper for one entity kind
///
/// Owns its executor and the identity map for `E`. The map lives as long
/// as the mapper and is unbounded. Entries leave it only through
/// [`Mapper::delete`] or [`Mapper::drop_table`], and a departing instance
/// always loses its identifier.
pub struct Mapper<E: Entity, X: SqlExecutor> {
    executor: X,
    identity_map: IdentityMap<E>,
    statements: TableStatements,
}

impl<E: Entity, X: SqlExecutor> Mapper<E, X> {
    pub fn new(executor: X) -> Self {
        Self {
            executor,
            identity_map: IdentityMap::new(),
            statements: TableStatements::for_entity::<E>(),
        }
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }

    pub fn identity_map(&self) -> &IdentityMap<E> {
        &self.identity_map
    }

    pub fn into_executor(self) -> X {
        self.executor
    }

    /// Peek at the identity map without touching storage
    pub fn cached(&self, id: E::Id) -> Option<Handle<E>> {
        self.identity_map.get(&id).cloned()
    }

    /// Create the backing table if it does not exist
    pub fn create_table(&self) -> Result<()> {
        log_op_start!("create_table", table = E::TABLE);
        let start = Instant::now();

        self.executor
            .execute(&self.statements.create_table, &[])
            .map_err(|e| {
                log_op_error!("create_table", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!("create_table", duration_ms = elapsed_ms(start), table = E::TABLE);
        Ok(())
    }

    /// Drop the backing table if it exists and detach every cached instance
    ///
    /// Each evicted instance has its identifier cleared, as [`Mapper::delete`]
    /// does, so a handle held across a drop cannot reach a row that storage
    /// later hands the same identifier.
    ///
    /// # Panics
    ///
    /// Panics if a cached instance is currently borrowed through a handle.
    pub fn drop_table(&mut self) -> Result<()> {
        log_op_start!("drop_table", table = E::TABLE);
        let start = Instant::now();

        self.executor
            .execute(&self.statements.drop_table, &[])
            .map_err(|e| {
                log_op_error!("drop_table", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;
        let mut evicted = 0usize;
        for handle in self.identity_map.drain() {
            handle.borrow_mut().clear_id();
            evicted += 1;
        }

        log_op_end!(
            "drop_table",
            duration_ms = elapsed_ms(start),
            table = E::TABLE,
            cache_len = evicted
        );
        Ok(())
    }

    /// Return the canonical instance for `row`
    ///
    /// A cached instance is refreshed from the row (the row wins over any
    /// unsaved in-memory edits) and returned; otherwise a new instance is
    /// built and registered. Two calls with the same row id always return
    /// handles to the same instance.
    ///
    /// # Panics
    ///
    /// Panics if the cached instance is currently borrowed through a
    /// handle.
    pub fn reconstruct_from_row(&mut self, row: E::Row) -> Handle<E> {
        let id = E::row_id(&row);

        if let Some(cached) = self.identity_map.get(&id) {
            cached.borrow_mut().refresh_from_row(row);
            tracing::trace!(entity = E::KIND, entity_id = %id, cache = CACHE_HIT);
            return cached.clone();
        }

        let handle = Handle::new(E::from_row(row));
        self.identity_map.insert(id, handle.clone());
        tracing::trace!(entity = E::KIND, entity_id = %id, cache = CACHE_MISS);
        handle
    }

    /// Every row of the table, in storage order
    ///
    /// Returns an empty vector for an empty table.
    pub fn list_all(&mut self) -> Result<Vec<Handle<E>>> {
        log_op_start!("list_all", entity = E::KIND);
        let start = Instant::now();

        let all = self.list_all_impl().map_err(|e| {
            log_op_error!("list_all", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!(
            "list_all",
            duration_ms = elapsed_ms(start),
            entity = E::KIND,
            row_count = all.len()
        );
        Ok(all)
    }

    fn list_all_impl(&mut self) -> Result<Vec<Handle<E>>> {
        let rows = self.query_rows(&self.statements.select_all, &[])?;
        Ok(rows
            .into_iter()
            .map(|row| self.reconstruct_from_row(row))
            .collect())
    }

    /// Load the row with identifier `id`, or `None` if there is none
    pub fn find_by_id(&mut self, id: E::Id) -> Result<Option<Handle<E>>> {
        log_op_start!("find_by_id", entity = E::KIND, entity_id = %id);
        let start = Instant::now();

        let found = self
            .find_first(Lookup::ById, id.into())
            .map_err(|e| {
                log_op_error!("find_by_id", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "find_by_id",
            duration_ms = elapsed_ms(start),
            entity_id = %id,
            found = found.is_some()
        );
        Ok(found)
    }

    /// Load the first row whose name column equals `name`
    ///
    /// No ordering is imposed, so when several rows share a name the one
    /// returned depends on storage order and should not be relied on.
    pub fn find_by_name(&mut self, name: &str) -> Result<Option<Handle<E>>> {
        log_op_start!("find_by_name", entity = E::KIND, key = name);
        let start = Instant::now();

        let found = self
            .find_first(Lookup::ByName, SqlValue::from(name))
            .map_err(|e| {
                log_op_error!("find_by_name", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "find_by_name",
            duration_ms = elapsed_ms(start),
            key = name,
            found = found.is_some()
        );
        Ok(found)
    }

    fn find_first(&mut self, lookup: Lookup, key: SqlValue) -> Result<Option<Handle<E>>> {
        let sql = match lookup {
            Lookup::ById => &self.statements.select_by_id,
            Lookup::ByName => &self.statements.select_by_name,
        };
        let rows = self.query_rows(sql, &[key])?;
        Ok(rows
            .into_iter()
            .next()
            .map(|row| self.reconstruct_from_row(row)))
    }

    /// Persist a new entity and register it in the identity map
    ///
    /// Calling this twice with the same attributes inserts two rows.
    pub fn create(&mut self, new: E::New) -> Result<Handle<E>> {
        log_op_start!("create", entity = E::KIND);
        let start = Instant::now();

        let handle = Handle::new(E::from_new(new));
        let id = self.insert_impl(&handle).map_err(|e| {
            log_op_error!("create", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!(
            "create",
            duration_ms = elapsed_ms(start),
            entity = E::KIND,
            entity_id = %id
        );
        Ok(handle)
    }

    /// Insert or update, depending on whether the instance has an identifier
    ///
    /// A detached instance (one whose row was deleted) is inserted as a new
    /// row, receives a fresh identifier and is registered again.
    pub fn save(&mut self, handle: &Handle<E>) -> Result<()> {
        log_op_start!("save", entity = E::KIND);
        let start = Instant::now();

        let result = match handle.id() {
            Some(id) => self.update_impl(handle).map(|()| id),
            None => self.insert_impl(handle),
        };
        let id = result.map_err(|e| {
            log_op_error!("save", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!("save", duration_ms = elapsed_ms(start), entity_id = %id);
        Ok(())
    }

    fn insert_impl(&mut self, handle: &Handle<E>) -> Result<E::Id> {
        let params = handle.borrow().attribute_values();
        self.executor.execute(&self.statements.insert, &params)?;
        let id = <E::Id as From<i64>>::from(self.executor.last_inserted_id()?);
        handle.borrow_mut().bind_id(id);

        if let Some(stale) = self.identity_map.insert(id, handle.clone()) {
            if !stale.ptr_eq(handle) {
                // Only reachable when the row was removed behind the mapper's back.
                stale.borrow_mut().clear_id();
                tracing::warn!(
                    entity = E::KIND,
                    entity_id = %id,
                    "identifier reused by storage; detached stale cached instance"
                );
            }
        }
        Ok(id)
    }

    /// Write the instance's current attributes to its row
    ///
    /// The identity map is left alone: the handle already is the cached
    /// instance. Fails with `ERR_NOT_PERSISTED` if the instance has no
    /// identifier.
    pub fn update(&self, handle: &Handle<E>) -> Result<()> {
        log_op_start!("update", entity = E::KIND);
        let start = Instant::now();

        self.update_impl(handle).map_err(|e| {
            log_op_error!("update", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!("update", duration_ms = elapsed_ms(start), entity = E::KIND);
        Ok(())
    }

    fn update_impl(&self, handle: &Handle<E>) -> Result<()> {
        let (id, mut params) = {
            let entity = handle.borrow();
            let id = entity.id().ok_or(RowMapError::NotPersisted {
                entity: E::KIND,
                op: "update",
            })?;
            (id, entity.attribute_values())
        };
        params.push(id.into());

        let affected = self.executor.execute(&self.statements.update, &params)?;
        if affected == 0 {
            tracing::warn!(entity = E::KIND, entity_id = %id, "update matched no row");
        }
        Ok(())
    }

    /// Delete the instance's row, drop it from the identity map and clear
    /// its identifier
    ///
    /// The instance stays usable in memory but is detached. Fails with
    /// `ERR_NOT_PERSISTED`, without touching storage, if it has no
    /// identifier.
    pub fn delete(&mut self, handle: &Handle<E>) -> Result<()> {
        log_op_start!("delete", entity = E::KIND);
        let start = Instant::now();

        let id = self.delete_impl(handle).map_err(|e| {
            log_op_error!("delete", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!("delete", duration_ms = elapsed_ms(start), entity_id = %id);
        Ok(())
    }

    fn delete_impl(&mut self, handle: &Handle<E>) -> Result<E::Id> {
        let id = handle.id().ok_or(RowMapError::NotPersisted {
            entity: E::KIND,
            op: "delete",
        })?;

        self.executor.execute(&self.statements.delete, &[id.into()])?;
        self.identity_map.remove(&id);
        handle.borrow_mut().clear_id();
        Ok(id)
    }

    fn query_rows(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<E::Row>> {
        self.executor
            .execute_query(sql, params)?
            .into_iter()
            .map(|raw| <E::Row as TryFrom<RawRow>>::try_from(raw).map_err(ExError::from))
            .collect()
    }
}
