use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value::ColumnType;

/// One typed, optionally required field of a custom table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub typ: ColumnType,
    pub required: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, typ: ColumnType, required: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            typ,
            required,
        }
    }

    /// A column only counts toward table creation when its name is non-blank.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// A user-defined table: the column list is the single source of truth for
/// which fields a row may and must carry. Columns are fixed after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTable {
    pub id: String,
    pub name: String,
    pub description: String,
    pub columns: Vec<Column>,
    pub created_at: NaiveDate,
}

impl CustomTable {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.required)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DraftError {
    #[error("Nome da tabela é obrigatório")]
    MissingName,
    #[error("Pelo menos uma coluna deve ser definida")]
    NoValidColumns,
}

/// Working state of the new-table dialog: name, description and an editable
/// column list. Starts from two seeded columns and never shrinks below two.
///
/// Column names are not checked for uniqueness; duplicates silently collide
/// in the row data map (last write wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDraft {
    pub name: String,
    pub description: String,
    pub columns: Vec<Column>,
}

impl Default for TableDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            columns: seed_columns(),
        }
    }
}

/// The two columns every fresh draft starts with.
fn seed_columns() -> Vec<Column> {
    vec![
        Column::new("Nome", ColumnType::Text, true),
        Column::new("Quantidade", ColumnType::Number, true),
    ]
}

impl TableDraft {
    /// Append a blank text column for the user to fill in.
    pub fn add_column(&mut self) -> &Column {
        self.columns.push(Column::new("", ColumnType::Text, false));
        self.columns.last().unwrap()
    }

    pub fn set_column_name(&mut self, id: &str, name: &str) {
        if let Some(col) = self.columns.iter_mut().find(|c| c.id == id) {
            col.name = name.to_string();
        }
    }

    pub fn set_column_type(&mut self, id: &str, typ: ColumnType) {
        if let Some(col) = self.columns.iter_mut().find(|c| c.id == id) {
            col.typ = typ;
        }
    }

    pub fn set_column_required(&mut self, id: &str, required: bool) {
        if let Some(col) = self.columns.iter_mut().find(|c| c.id == id) {
            col.required = required;
        }
    }

    /// Drop a column. No-op while only two remain; a table keeps a floor of
    /// two columns in its draft.
    pub fn remove_column(&mut self, id: &str) {
        if self.columns.len() > 2 {
            self.columns.retain(|c| c.id != id);
        }
    }

    /// Turn the draft into a table dated today. Requires a non-blank table
    /// name and at least one valid column; only the valid columns are kept.
    pub fn build(&self, today: NaiveDate) -> Result<CustomTable, DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }

        let valid_columns: Vec<Column> =
            self.columns.iter().filter(|c| c.is_valid()).cloned().collect();
        if valid_columns.is_empty() {
            return Err(DraftError::NoValidColumns);
        }

        Ok(CustomTable {
            id: Uuid::new_v4().to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            columns: valid_columns,
            created_at: today,
        })
    }

    /// Reset back to the seeded two-column state after a table is created.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_draft_seeds_two_columns() {
        let draft = TableDraft::default();
        assert_eq!(draft.columns.len(), 2);
        assert_eq!(draft.columns[0].name, "Nome");
        assert_eq!(draft.columns[1].name, "Quantidade");
        assert_eq!(draft.columns[1].typ, ColumnType::Number);
        assert!(draft.columns.iter().all(|c| c.required));
    }

    #[test]
    fn test_add_column_starts_blank() {
        let mut draft = TableDraft::default();
        draft.add_column();
        assert_eq!(draft.columns.len(), 3);
        let added = &draft.columns[2];
        assert_eq!(added.name, "");
        assert_eq!(added.typ, ColumnType::Text);
        assert!(!added.required);
    }

    #[test]
    fn test_remove_column_floor_of_two() {
        let mut draft = TableDraft::default();
        let first = draft.columns[0].id.clone();
        draft.remove_column(&first);
        assert_eq!(draft.columns.len(), 2, "floor of two columns");

        draft.add_column();
        let third = draft.columns[2].id.clone();
        draft.remove_column(&third);
        assert_eq!(draft.columns.len(), 2);
    }

    #[test]
    fn test_build_requires_name() {
        let draft = TableDraft::default();
        assert_eq!(draft.build(today()), Err(DraftError::MissingName));

        let mut draft = TableDraft::default();
        draft.name = "   ".into();
        assert_eq!(draft.build(today()), Err(DraftError::MissingName));
    }

    #[test]
    fn test_build_requires_one_valid_column() {
        let mut draft = TableDraft::default();
        draft.name = "Limpeza".into();
        for col in &mut draft.columns {
            col.name = String::new();
        }
        assert_eq!(draft.build(today()), Err(DraftError::NoValidColumns));
    }

    #[test]
    fn test_build_keeps_only_valid_columns() {
        let mut draft = TableDraft::default();
        draft.name = "Limpeza".into();
        draft.add_column(); // blank name, dropped on build
        let table = draft.build(today()).unwrap();
        assert_eq!(table.name, "Limpeza");
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.created_at, today());
    }

    #[test]
    fn test_update_column_fields() {
        let mut draft = TableDraft::default();
        let id = draft.add_column().id.clone();
        draft.set_column_name(&id, "Data de Entrada");
        draft.set_column_type(&id, ColumnType::Date);
        draft.set_column_required(&id, true);

        let col = draft.columns.iter().find(|c| c.id == id).unwrap();
        assert_eq!(col.name, "Data de Entrada");
        assert_eq!(col.typ, ColumnType::Date);
        assert!(col.required);
    }

    #[test]
    fn test_duplicate_column_names_allowed() {
        let mut draft = TableDraft::default();
        draft.name = "Cozinha".into();
        let id = draft.add_column().id.clone();
        draft.set_column_name(&id, "Nome");
        let table = draft.build(today()).unwrap();
        // not enforced: two columns may share a name
        assert_eq!(table.columns.iter().filter(|c| c.name == "Nome").count(), 2);
    }
}
