use std::collections::HashMap;

use crate::row::Row;
use crate::schema::CustomTable;
use crate::value::Value;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FormError {
    #[error("Campos obrigatórios não preenchidos: {}", .fields.join(", "))]
    MissingRequired { fields: Vec<String> },
}

/// Editable field state for one row, materialized from a table's schema.
/// Rendering and coercion are a single traversal over the column list; the
/// form itself never mutates any store.
#[derive(Debug, Clone)]
pub struct RowForm {
    values: HashMap<String, Value>,
}

impl RowForm {
    /// Initialize from per-column defaults (0 for numbers, empty string
    /// otherwise), overlaying the values of an existing row when editing.
    /// An unfilled cell of the existing row falls back to the default, same
    /// as a fresh form.
    pub fn new(table: &CustomTable, existing: Option<&Row>) -> Self {
        let mut values = HashMap::new();
        for column in &table.columns {
            let value = existing
                .and_then(|row| row.get(&column.name))
                .filter(|v| !v.is_empty_for_required())
                .cloned()
                .unwrap_or_else(|| column.typ.default_value());
            values.insert(column.name.clone(), value);
        }
        Self { values }
    }

    /// Capture raw input for a column, coerced by its declared type.
    /// Unknown column names are ignored.
    pub fn set_field(&mut self, table: &CustomTable, column_name: &str, raw: &str) {
        if let Some(column) = table.column(column_name) {
            self.values
                .insert(column.name.clone(), Value::coerce(column.typ, raw));
        }
    }

    pub fn get(&self, column_name: &str) -> Option<&Value> {
        self.values.get(column_name)
    }

    /// Check every required column for a filled value. On failure the
    /// missing names are aggregated into a single error, in schema order.
    pub fn validate(&self, table: &CustomTable) -> Result<(), FormError> {
        let fields: Vec<String> = table
            .required_columns()
            .filter(|col| {
                self.values
                    .get(&col.name)
                    .map(Value::is_empty_for_required)
                    .unwrap_or(true)
            })
            .map(|col| col.name.clone())
            .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingRequired { fields })
        }
    }

    /// Hand the captured values over for a store mutation.
    pub fn into_data(self) -> HashMap<String, Value> {
        self.values
    }

    pub fn data(&self) -> &HashMap<String, Value> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, CustomTable};
    use crate::value::ColumnType;
    use chrono::NaiveDate;

    fn sample_table() -> CustomTable {
        CustomTable {
            id: "t1".into(),
            name: "Cozinha".into(),
            description: "Controle de alimentos".into(),
            columns: vec![
                Column::new("Nome", ColumnType::Text, true),
                Column::new("Quantidade", ColumnType::Number, true),
                Column::new("Data de Entrada", ColumnType::Date, false),
            ],
            created_at: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        }
    }

    #[test]
    fn test_new_form_uses_defaults() {
        let table = sample_table();
        let form = RowForm::new(&table, None);
        assert_eq!(form.get("Nome"), Some(&Value::Text(String::new())));
        assert_eq!(form.get("Quantidade"), Some(&Value::Number(0.0)));
        assert_eq!(form.get("Data de Entrada"), Some(&Value::Text(String::new())));
    }

    #[test]
    fn test_form_overlays_existing_row() {
        let table = sample_table();
        let mut data = HashMap::new();
        data.insert("Nome".to_string(), Value::Text("Arroz".into()));
        data.insert("Quantidade".to_string(), Value::Number(10.0));
        let row = Row::new("t1", data, table.created_at);

        let form = RowForm::new(&table, Some(&row));
        assert_eq!(form.get("Nome"), Some(&Value::Text("Arroz".into())));
        assert_eq!(form.get("Quantidade"), Some(&Value::Number(10.0)));
        // column absent from the row falls back to its default
        assert_eq!(form.get("Data de Entrada"), Some(&Value::Text(String::new())));
    }

    #[test]
    fn test_set_field_coerces_by_column_type() {
        let table = sample_table();
        let mut form = RowForm::new(&table, None);
        form.set_field(&table, "Quantidade", "12");
        form.set_field(&table, "Nome", "Feijão");
        assert_eq!(form.get("Quantidade"), Some(&Value::Number(12.0)));
        assert_eq!(form.get("Nome"), Some(&Value::Text("Feijão".into())));

        form.set_field(&table, "Quantidade", "abc");
        assert_eq!(form.get("Quantidade"), Some(&Value::Number(0.0)));
    }

    #[test]
    fn test_set_field_unknown_column_ignored() {
        let table = sample_table();
        let mut form = RowForm::new(&table, None);
        form.set_field(&table, "Fornecedor", "Bic");
        assert_eq!(form.get("Fornecedor"), None);
    }

    #[test]
    fn test_validate_reports_all_missing_fields() {
        let table = sample_table();
        let form = RowForm::new(&table, None);
        let err = form.validate(&table).unwrap_err();
        assert_eq!(
            err,
            FormError::MissingRequired {
                fields: vec!["Nome".into(), "Quantidade".into()]
            }
        );
        assert_eq!(
            err.to_string(),
            "Campos obrigatórios não preenchidos: Nome, Quantidade"
        );
    }

    #[test]
    fn test_validate_passes_when_required_filled() {
        let table = sample_table();
        let mut form = RowForm::new(&table, None);
        form.set_field(&table, "Nome", "Detergente");
        form.set_field(&table, "Quantidade", "10");
        assert_eq!(form.validate(&table), Ok(()));
    }

    #[test]
    fn test_validate_rejects_numeric_zero() {
        // historic behavior: an explicit 0 in a required number column is
        // still treated as unfilled
        let table = sample_table();
        let mut form = RowForm::new(&table, None);
        form.set_field(&table, "Nome", "Detergente");
        form.set_field(&table, "Quantidade", "0");
        let err = form.validate(&table).unwrap_err();
        assert_eq!(
            err,
            FormError::MissingRequired {
                fields: vec!["Quantidade".into()]
            }
        );
    }

    #[test]
    fn test_optional_fields_may_stay_empty() {
        let table = sample_table();
        let mut form = RowForm::new(&table, None);
        form.set_field(&table, "Nome", "Arroz");
        form.set_field(&table, "Quantidade", "5");
        // "Data de Entrada" left empty; not required
        assert_eq!(form.validate(&table), Ok(()));
    }
}
