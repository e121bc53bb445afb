//! rowmap core - identity-mapped row-to-object mapping
//!
//! This crate provides:
//! - The `Department` entity model with its typed row and unsaved form
//! - The `Entity` trait describing how a table maps onto a Rust type
//! - The `SqlExecutor` seam the mapper issues statements through
//! - `IdentityMap`, guaranteeing one in-memory instance per row id
//! - `Mapper`, the create/read/update/delete surface over all of the above
//! - Error and logging facilities shared by the other rowmap crates
//!
//! No SQL driver lives here; see `rowmap-store` for the SQLite executor.

pub mod entity;
pub mod errors;
pub mod executor;
pub mod identity_map;
pub mod logging_facility;
pub mod mapper;
pub mod model;
mod sql;
pub mod value;

pub use rowmap_core_types as types;

// Re-export commonly used types
pub use entity::{Entity, Handle};
pub use errors::{ExError, ExErrorKind, Result, RowMapError};
pub use executor::SqlExecutor;
pub use identity_map::IdentityMap;
pub use mapper::{DepartmentMapper, Mapper};
pub use model::{Department, DepartmentId, DepartmentRow, NewDepartment};
pub use value::{RawRow, SqlValue};
