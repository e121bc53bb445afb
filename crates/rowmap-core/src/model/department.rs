use std::fmt;

use serde::Serialize;

use crate::entity::Entity;
use crate::errors::RowMapError;
use crate::value::{RawRow, SqlValue};

/// Primary key of a `departments` row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DepartmentId(i64);

impl DepartmentId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for DepartmentId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl From<DepartmentId> for SqlValue {
    fn from(id: DepartmentId) -> Self {
        SqlValue::Integer(id.0)
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Department - one row of the `departments` table held in memory
///
/// The identifier is `None` only for an instance whose row was deleted;
/// such an instance stays usable but is detached from storage until it is
/// saved again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    id: Option<DepartmentId>,

    /// Department name, matched by `find_by_name`
    pub name: String,

    /// Free-text location, e.g. a building
    pub location: String,
}

impl Department {
    pub fn id(&self) -> Option<DepartmentId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Department {}: {}, {}>", id, self.name, self.location),
            None => write!(f, "<Department (detached): {}, {}>", self.name, self.location),
        }
    }
}

/// Attributes of a department that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDepartment {
    pub name: String,
    pub location: String,
}

impl NewDepartment {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// Typed `departments` row: `(id, name, location)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRow {
    pub id: DepartmentId,
    pub name: String,
    pub location: String,
}

impl DepartmentRow {
    pub fn new(id: i64, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: DepartmentId(id),
            name: name.into(),
            location: location.into(),
        }
    }
}

fn shape_error(reason: String) -> RowMapError {
    RowMapError::RowShape {
        table: Department::TABLE,
        reason,
    }
}

fn text_cell(value: SqlValue, column: &str) -> Result<String, RowMapError> {
    let type_name = value.type_name();
    value
        .into_text()
        .ok_or_else(|| shape_error(format!("column {} expected TEXT, got {}", column, type_name)))
}

impl TryFrom<RawRow> for DepartmentRow {
    type Error = RowMapError;

    fn try_from(raw: RawRow) -> Result<Self, Self::Error> {
        let [id, name, location]: [SqlValue; 3] = raw
            .try_into()
            .map_err(|raw: RawRow| shape_error(format!("expected 3 columns, got {}", raw.len())))?;

        let id = id
            .as_i64()
            .ok_or_else(|| shape_error(format!("column id expected INTEGER, got {}", id.type_name())))?;

        Ok(Self {
            id: DepartmentId(id),
            name: text_cell(name, "name")?,
            location: text_cell(location, "location")?,
        })
    }
}

impl Entity for Department {
    type Id = DepartmentId;
    type Row = DepartmentRow;
    type New = NewDepartment;

    const KIND: &'static str = "Department";
    const TABLE: &'static str = "departments";
    const COLUMNS: &'static [&'static str] = &["name", "location"];
    const NAME_COLUMN: &'static str = "name";

    fn row_id(row: &DepartmentRow) -> DepartmentId {
        row.id
    }

    fn from_new(new: NewDepartment) -> Self {
        Self {
            id: None,
            name: new.name,
            location: new.location,
        }
    }

    fn from_row(row: DepartmentRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            location: row.location,
        }
    }

    fn refresh_from_row(&mut self, row: DepartmentRow) {
        self.name = row.name;
        self.location = row.location;
    }

    fn id(&self) -> Option<DepartmentId> {
        self.id
    }

    fn bind_id(&mut self, id: DepartmentId) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn attribute_values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::from(self.name.as_str()),
            SqlValue::from(self.location.as_str()),
        ]
    }
}
