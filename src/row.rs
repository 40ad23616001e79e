use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value::Value;

/// One entry of a custom table: a mapping from column name to value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub table_id: String,
    pub data: HashMap<String, Value>,
    pub created_at: NaiveDate,
}

impl Row {
    pub fn new(table_id: impl Into<String>, data: HashMap<String, Value>, today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            table_id: table_id.into(),
            data,
            created_at: today,
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.data.get(column)
    }
}

/// Ordered collection of rows for the table currently in view. The whole
/// store is swapped when the active table changes; there is no incremental
/// sync against a backing store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowStore {
    rows: Vec<Row>,
}

impl RowStore {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Append a row. No uniqueness or foreign-key check is applied.
    pub fn add(&mut self, row: Row) {
        tracing::debug!(row_id = %row.id, table_id = %row.table_id, "row added");
        self.rows.push(row);
    }

    /// Replace a row's data wholesale. Silent no-op when the id is unknown.
    pub fn update(&mut self, id: &str, data: HashMap<String, Value>) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.data = data;
            tracing::debug!(row_id = %id, "row updated");
        }
    }

    /// Drop a row by id; unknown ids are harmless.
    pub fn remove(&mut self, id: &str) {
        self.rows.retain(|r| r.id != id);
    }

    /// Nudge a numeric cell by `delta`, clamping at zero. Absent or
    /// non-numeric cells read as 0 before the delta is applied. Returns the
    /// written value when the row exists.
    pub fn adjust_quantity(&mut self, id: &str, column: &str, delta: f64) -> Option<f64> {
        let row = self.rows.iter_mut().find(|r| r.id == id)?;
        let current = row.data.get(column).map(Value::as_number).unwrap_or(0.0);
        let next = (current + delta).max(0.0);
        row.data.insert(column.to_string(), Value::Number(next));
        tracing::debug!(row_id = %id, column, from = current, to = next, "quantity adjusted");
        Some(next)
    }
}
