//! Entity kinds and shared handles
//!
//! An [`Entity`] describes how one table maps onto one Rust type: its
//! column layout, its typed row, and how instances are built from or
//! refreshed by a row. The [`Mapper`](crate::mapper::Mapper) is written
//! once against this trait.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::errors::RowMapError;
use crate::value::{RawRow, SqlValue};

/// Mapping between one table and one in-memory type
pub trait Entity: Sized {
    /// Primary key type; the storage layer hands out `i64` row ids
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + From<i64> + Into<SqlValue>;

    /// Fixed-arity typed row, decoded from a raw row at the storage boundary
    type Row: TryFrom<RawRow, Error = RowMapError>;

    /// Unsaved attributes, the first phase of construction
    type New;

    /// Human-readable kind name used in errors and logs
    const KIND: &'static str;

    /// Backing table
    const TABLE: &'static str;

    /// Attribute columns after `id`, in schema order
    const COLUMNS: &'static [&'static str];

    /// Column matched by `find_by_name`; must be one of `COLUMNS`
    const NAME_COLUMN: &'static str;

    fn row_id(row: &Self::Row) -> Self::Id;

    /// Build an unsaved instance (no identifier yet)
    fn from_new(new: Self::New) -> Self;

    /// Build a persisted instance from a row, identifier included
    fn from_row(row: Self::Row) -> Self;

    /// Overwrite every attribute with the row's values; the identifier is
    /// left as is
    fn refresh_from_row(&mut self, row: Self::Row);

    fn id(&self) -> Option<Self::Id>;

    /// Called by the mapper once storage has assigned an identifier
    fn bind_id(&mut self, id: Self::Id);

    /// Called by the mapper after the backing row is deleted
    fn clear_id(&mut self);

    /// Current attribute values in `COLUMNS` order
    fn attribute_values(&self) -> Vec<SqlValue>;
}

/// Shared reference to the canonical in-memory instance of an entity
///
/// Cloning a handle clones the reference, not the entity. Two handles
/// refer to the same instance exactly when [`Handle::ptr_eq`] holds.
/// Handles are single-threaded (`!Send`).
pub struct Handle<E>(Rc<RefCell<E>>);

impl<E> Handle<E> {
    pub fn new(entity: E) -> Self {
        Self(Rc::new(RefCell::new(entity)))
    }

    /// Immutable view of the instance
    ///
    /// # Panics
    ///
    /// Panics if the instance is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, E> {
        self.0.borrow()
    }

    /// Mutable view of the instance
    ///
    /// Do not hold the guard across mapper calls: a reload of the same row
    /// needs to write through the handle.
    ///
    /// # Panics
    ///
    /// Panics if the instance is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, E> {
        self.0.borrow_mut()
    }

    /// True when both handles point at the same instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles to this instance, the identity map's included
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl<E: Entity> Handle<E> {
    /// Identifier of the instance, `None` when unsaved or deleted
    pub fn id(&self) -> Option<E::Id> {
        self.0.borrow().id()
    }
}

impl<E> Clone for Handle<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E: fmt::Debug> fmt::Debug for Handle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&*self.0.borrow()).finish()
    }
}

impl<E: fmt::Display> fmt::Display for Handle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0.borrow(), f)
    }
}
