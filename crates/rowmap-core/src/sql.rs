//! Statement text for one entity's table
//!
//! Column and table names come from `Entity` constants only; every
//! caller-supplied value is bound positionally.

use crate::entity::Entity;

/// Pre-rendered statements for one entity kind
#[derive(Debug, Clone)]
pub(crate) struct TableStatements {
    pub create_table: String,
    pub drop_table: String,
    pub select_all: String,
    pub select_by_id: String,
    pub select_by_name: String,
    pub insert: String,
    pub update: String,
    pub delete: String,
}

impl TableStatements {
    pub fn for_entity<E: Entity>() -> Self {
        let table = E::TABLE;
        let columns = E::COLUMNS.join(", ");
        let placeholders = vec!["?"; E::COLUMNS.len()].join(", ");
        let assignments = E::COLUMNS
            .iter()
            .map(|c| format!("{} = ?", c))
            .collect::<Vec<_>>()
            .join(", ");
        let column_defs = E::COLUMNS
            .iter()
            .map(|c| format!("{} TEXT", c))
            .collect::<Vec<_>>()
            .join(", ");

        // No ORDER BY anywhere: rows come back in storage order.
        let select_all = format!("SELECT id, {} FROM {}", columns, table);

        Self {
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY, {})",
                table, column_defs
            ),
            drop_table: format!("DROP TABLE IF EXISTS {}", table),
            select_by_id: format!("{} WHERE id = ?", select_all),
            select_by_name: format!("{} WHERE {} = ? LIMIT 1", select_all, E::NAME_COLUMN),
            insert: format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table, columns, placeholders
            ),
            update: format!("UPDATE {} SET {} WHERE id = ?", table, assignments),
            delete: format!("DELETE FROM {} WHERE id = ?", table),
            select_all,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Department;

    #[test]
    fn test_department_statements() {
        let s = TableStatements::for_entity::<Department>();

        assert_eq!(
            s.create_table,
            "CREATE TABLE IF NOT EXISTS departments (id INTEGER PRIMARY KEY, name TEXT, location TEXT)"
        );
        assert_eq!(s.drop_table, "DROP TABLE IF EXISTS departments");
        assert_eq!(s.select_all, "SELECT id, name, location FROM departments");
        assert_eq!(
            s.select_by_id,
            "SELECT id, name, location FROM departments WHERE id = ?"
        );
        assert_eq!(
            s.select_by_name,
            "SELECT id, name, location FROM departments WHERE name = ? LIMIT 1"
        );
        assert_eq!(
            s.insert,
            "INSERT INTO departments (name, location) VALUES (?, ?)"
        );
        assert_eq!(
            s.update,
            "UPDATE departments SET name = ?, location = ? WHERE id = ?"
        );
        assert_eq!(s.delete, "DELETE FROM departments WHERE id = ?");
    }
}
