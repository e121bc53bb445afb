use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use rowmap_core::{ExError, RawRow, Result, SqlExecutor, SqlValue};

/// Executor fake that records every statement and replays queued results
///
/// Queries pop the next queued result set (empty when nothing is queued).
/// Each INSERT advances the generated identifier by one, starting at 1.
#[derive(Default)]
pub struct ScriptedExecutor {
    statements: RefCell<Vec<(String, Vec<SqlValue>)>>,
    results: RefCell<VecDeque<Result<Vec<RawRow>>>>,
    last_id: Cell<i64>,
    fail_next: RefCell<Option<ExError>>,
}

#[allow(dead_code)]
impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_rows(&self, rows: Vec<RawRow>) {
        self.results.borrow_mut().push_back(Ok(rows));
    }

    pub fn queue_error(&self, err: ExError) {
        self.results.borrow_mut().push_back(Err(err));
    }

    /// Make the next `execute` call fail with `err`
    pub fn fail_next_execute(&self, err: ExError) {
        *self.fail_next.borrow_mut() = Some(err);
    }

    pub fn statements(&self) -> Vec<(String, Vec<SqlValue>)> {
        self.statements.borrow().clone()
    }

    pub fn statement_count(&self) -> usize {
        self.statements.borrow().len()
    }

    pub fn last_statement(&self) -> Option<(String, Vec<SqlValue>)> {
        self.statements.borrow().last().cloned()
    }

    fn record(&self, sql: &str, params: &[SqlValue]) {
        self.statements
            .borrow_mut()
            .push((sql.to_string(), params.to_vec()));
    }
}

impl SqlExecutor for ScriptedExecutor {
    fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<usize> {
        self.record(sql, params);
        if let Some(err) = self.fail_next.borrow_mut().take() {
            return Err(err);
        }
        if sql.starts_with("INSERT") {
            self.last_id.set(self.last_id.get() + 1);
        }
        Ok(1)
    }

    fn execute_query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<RawRow>> {
        self.record(sql, params);
        self.results.borrow_mut().pop_front().unwrap_or(Ok(Vec::new()))
    }

    fn last_inserted_id(&self) -> Result<i64> {
        Ok(self.last_id.get())
    }
}

/// Raw `departments` row
#[allow(dead_code)]
pub fn dept_row(id: i64, name: &str, location: &str) -> RawRow {
    vec![
        SqlValue::Integer(id),
        SqlValue::from(name),
        SqlValue::from(location),
    ]
}
