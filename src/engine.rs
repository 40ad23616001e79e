use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::form::RowForm;
use crate::notify::Notification;
use crate::row::{Row, RowStore};
use crate::schema::{CustomTable, TableDraft};

/// Orchestrates the custom-table feature: the table list, the new-table
/// draft, and the row store of whichever table is selected. Every mutation
/// resolves to a notification; nothing panics past this boundary.
///
/// Rows are transient view state: selecting a table swaps the store
/// wholesale (seed rows keyed by table id, else empty) and leaving it
/// discards them.
#[derive(Debug, Default)]
pub struct Engine {
    tables: Vec<CustomTable>,
    draft: TableDraft,
    selected: Option<String>,
    rows: RowStore,
    seeds: HashMap<String, Vec<Row>>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seeds(tables: Vec<CustomTable>, seeds: HashMap<String, Vec<Row>>) -> Self {
        Self {
            tables,
            seeds,
            ..Self::default()
        }
    }

    pub fn tables(&self) -> &[CustomTable] {
        &self.tables
    }

    pub fn table(&self, id: &str) -> Option<&CustomTable> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn draft(&self) -> &TableDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TableDraft {
        &mut self.draft
    }

    /// Commit the draft as a new table. On success the draft resets to its
    /// seeded state; on validation failure nothing changes.
    pub fn create_table(&mut self, today: NaiveDate) -> Notification {
        match self.draft.build(today) {
            Ok(table) => {
                tracing::info!(table = %table.name, columns = table.columns.len(), "table created");
                self.tables.push(table);
                self.draft.reset();
                Notification::success("Sucesso", "Tabela criada com sucesso!")
            }
            Err(e) => Notification::error("Erro", e.to_string()),
        }
    }

    /// Remove a table unconditionally. Deleting the table currently in view
    /// also drops its rows.
    pub fn delete_table(&mut self, id: &str) -> Notification {
        self.tables.retain(|t| t.id != id);
        if self.selected.as_deref() == Some(id) {
            self.close_table();
        }
        Notification::success("Tabela removida", "A tabela foi removida com sucesso")
    }

    /// Enter the per-table detail view, loading that table's row set. Seeded
    /// rows are looked up by table id. Returns false when the id is unknown.
    pub fn select_table(&mut self, id: &str) -> bool {
        if self.table(id).is_none() {
            return false;
        }
        let rows = self.seeds.get(id).cloned().unwrap_or_default();
        self.rows = RowStore::new(rows);
        self.selected = Some(id.to_string());
        true
    }

    /// Leave the detail view; the row set is discarded.
    pub fn close_table(&mut self) {
        self.selected = None;
        self.rows = RowStore::default();
    }

    pub fn selected_table(&self) -> Option<&CustomTable> {
        let id = self.selected.as_deref()?;
        self.table(id)
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    /// Fresh form for the selected table, fields at their defaults.
    pub fn new_row_form(&self) -> Option<RowForm> {
        Some(RowForm::new(self.selected_table()?, None))
    }

    /// Form pre-filled from an existing row of the selected table.
    pub fn edit_row_form(&self, row_id: &str) -> Option<RowForm> {
        let table = self.selected_table()?;
        let row = self.rows.get(row_id)?;
        Some(RowForm::new(table, Some(row)))
    }

    /// Validate and append a row built from the form. On validation failure
    /// the aggregated missing-field error is reported and nothing mutates.
    pub fn add_row(&mut self, form: RowForm, today: NaiveDate) -> Notification {
        let Some(table) = self.selected_table() else {
            return Notification::error("Erro", "Nenhuma tabela selecionada");
        };
        if let Err(e) = form.validate(table) {
            return Notification::error("Erro", e.to_string());
        }
        let row = Row::new(table.id.clone(), form.into_data(), today);
        self.rows.add(row);
        Notification::success("Sucesso", "Item adicionado com sucesso!")
    }

    /// Validate and replace an existing row's data wholesale.
    pub fn edit_row(&mut self, row_id: &str, form: RowForm) -> Notification {
        let Some(table) = self.selected_table() else {
            return Notification::error("Erro", "Nenhuma tabela selecionada");
        };
        if let Err(e) = form.validate(table) {
            return Notification::error("Erro", e.to_string());
        }
        self.rows.update(row_id, form.into_data());
        Notification::success("Sucesso", "Item atualizado com sucesso!")
    }

    pub fn delete_row(&mut self, row_id: &str) -> Notification {
        self.rows.remove(row_id);
        Notification::success("Item removido", "O item foi removido com sucesso")
    }

    /// Stock-counter shortcut on a numeric cell; clamps at zero. No
    /// notification: the running counter is its own feedback.
    pub fn adjust_row_quantity(&mut self, row_id: &str, column: &str, delta: f64) -> Option<f64> {
        self.rows.adjust_quantity(row_id, column, delta)
    }
}

/// Serialized state for the native report binary and demos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub tables: Vec<CustomTable>,
    /// Rows keyed by table id.
    #[serde(default)]
    pub rows: HashMap<String, Vec<Row>>,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn engine_with_table(name: &str) -> (Engine, String) {
        let mut engine = Engine::new();
        engine.draft_mut().name = name.to_string();
        assert!(engine.create_table(today()).is_success());
        let id = engine.tables()[0].id.clone();
        (engine, id)
    }

    #[test]
    fn test_create_table_success_resets_draft() {
        let mut engine = Engine::new();
        engine.draft_mut().name = "Limpeza".into();
        engine.draft_mut().description = "Produtos de limpeza".into();

        let n = engine.create_table(today());
        assert!(n.is_success());
        assert_eq!(n.description, "Tabela criada com sucesso!");
        assert_eq!(engine.tables().len(), 1);
        assert_eq!(engine.tables()[0].columns.len(), 2);
        assert_eq!(engine.draft().name, "", "draft reset after creation");
        assert_eq!(engine.draft().columns.len(), 2);
    }

    #[test]
    fn test_create_table_missing_name_changes_nothing() {
        let mut engine = Engine::new();
        let n = engine.create_table(today());
        assert!(n.is_error());
        assert_eq!(n.description, "Nome da tabela é obrigatório");
        assert!(engine.tables().is_empty());
    }

    #[test]
    fn test_create_table_requires_valid_column() {
        let mut engine = Engine::new();
        engine.draft_mut().name = "Limpeza".into();
        for col in &mut engine.draft_mut().columns {
            col.name = String::new();
        }
        let n = engine.create_table(today());
        assert!(n.is_error());
        assert_eq!(n.description, "Pelo menos uma coluna deve ser definida");
        assert!(engine.tables().is_empty());
    }

    #[test]
    fn test_delete_table_removes_exactly_one() {
        let mut engine = Engine::new();
        for name in ["Publicações CCB", "Material de Escritório", "Cozinha"] {
            engine.draft_mut().name = name.to_string();
            engine.create_table(today());
        }
        let id = engine.tables()[1].id.clone();

        let n = engine.delete_table(&id);
        assert!(n.is_success());
        assert_eq!(n.title, "Tabela removida");
        assert_eq!(engine.tables().len(), 2);
        assert_eq!(engine.tables()[0].name, "Publicações CCB");
        assert_eq!(engine.tables()[1].name, "Cozinha");
    }

    #[test]
    fn test_delete_selected_table_closes_view() {
        let (mut engine, id) = engine_with_table("Cozinha");
        assert!(engine.select_table(&id));
        engine.delete_table(&id);
        assert!(engine.selected_table().is_none());
        assert!(engine.rows().is_empty());
    }

    #[test]
    fn test_select_unknown_table() {
        let mut engine = Engine::new();
        assert!(!engine.select_table("missing"));
    }

    #[test]
    fn test_select_table_loads_seed_rows_by_id() {
        let mut engine = Engine::new();
        engine.draft_mut().name = "Cozinha".into();
        engine.create_table(today());
        let id = engine.tables()[0].id.clone();

        let mut data = HashMap::new();
        data.insert("Nome".to_string(), Value::Text("Arroz".into()));
        data.insert("Quantidade".to_string(), Value::Number(10.0));
        engine
            .seeds
            .insert(id.clone(), vec![Row::new(id.clone(), data, today())]);

        assert!(engine.select_table(&id));
        assert_eq!(engine.rows().len(), 1);

        // switching away discards the working rows
        engine.close_table();
        assert!(engine.rows().is_empty());
    }

    #[test]
    fn test_add_row_full_flow() {
        let (mut engine, id) = engine_with_table("Limpeza");
        engine.select_table(&id);

        let table = engine.selected_table().unwrap().clone();
        let mut form = engine.new_row_form().unwrap();
        form.set_field(&table, "Nome", "Detergente");
        form.set_field(&table, "Quantidade", "10");

        let n = engine.add_row(form, today());
        assert!(n.is_success());
        assert_eq!(engine.rows().len(), 1);
        assert_eq!(
            engine.rows().rows()[0].get("Quantidade"),
            Some(&Value::Number(10.0))
        );
    }

    #[test]
    fn test_add_row_missing_required_is_rejected() {
        let (mut engine, id) = engine_with_table("Limpeza");
        engine.select_table(&id);

        let table = engine.selected_table().unwrap().clone();
        let mut form = engine.new_row_form().unwrap();
        form.set_field(&table, "Nome", "");
        form.set_field(&table, "Quantidade", "5");

        let n = engine.add_row(form, today());
        assert!(n.is_error());
        assert_eq!(
            n.description,
            "Campos obrigatórios não preenchidos: Nome"
        );
        assert!(engine.rows().is_empty());
    }

    #[test]
    fn test_add_row_without_selection() {
        let (mut engine, id) = engine_with_table("Limpeza");
        engine.select_table(&id);
        let form = engine.new_row_form().unwrap();
        engine.close_table();

        let n = engine.add_row(form, today());
        assert!(n.is_error());
        assert_eq!(n.description, "Nenhuma tabela selecionada");
    }

    #[test]
    fn test_edit_row_replaces_data() {
        let (mut engine, id) = engine_with_table("Limpeza");
        engine.select_table(&id);
        let table = engine.selected_table().unwrap().clone();

        let mut form = engine.new_row_form().unwrap();
        form.set_field(&table, "Nome", "Detergente");
        form.set_field(&table, "Quantidade", "10");
        engine.add_row(form, today());
        let row_id = engine.rows().rows()[0].id.clone();

        let mut form = engine.edit_row_form(&row_id).unwrap();
        assert_eq!(form.get("Nome"), Some(&Value::Text("Detergente".into())));
        form.set_field(&table, "Quantidade", "25");

        let n = engine.edit_row(&row_id, form);
        assert!(n.is_success());
        assert_eq!(n.description, "Item atualizado com sucesso!");
        assert_eq!(
            engine.rows().get(&row_id).unwrap().get("Quantidade"),
            Some(&Value::Number(25.0))
        );
    }

    #[test]
    fn test_quantity_shortcut_clamps_at_zero() {
        let (mut engine, id) = engine_with_table("Limpeza");
        engine.select_table(&id);
        let table = engine.selected_table().unwrap().clone();

        let mut form = engine.new_row_form().unwrap();
        form.set_field(&table, "Nome", "Detergente");
        form.set_field(&table, "Quantidade", "10");
        engine.add_row(form, today());
        let row_id = engine.rows().rows()[0].id.clone();

        assert_eq!(
            engine.adjust_row_quantity(&row_id, "Quantidade", -15.0),
            Some(0.0)
        );
    }

    #[test]
    fn test_delete_row_is_idempotent() {
        let (mut engine, id) = engine_with_table("Limpeza");
        engine.select_table(&id);
        let table = engine.selected_table().unwrap().clone();

        let mut form = engine.new_row_form().unwrap();
        form.set_field(&table, "Nome", "Detergente");
        form.set_field(&table, "Quantidade", "10");
        engine.add_row(form, today());
        let row_id = engine.rows().rows()[0].id.clone();

        assert!(engine.delete_row(&row_id).is_success());
        assert!(engine.rows().is_empty());
        // deleting again is harmless and still reports removal
        assert!(engine.delete_row(&row_id).is_success());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let (engine, _) = engine_with_table("Limpeza");
        let snapshot = Snapshot {
            tables: engine.tables().to_vec(),
            rows: HashMap::new(),
            products: Vec::new(),
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.tables.len(), 1);
        assert_eq!(parsed.tables[0].name, "Limpeza");
    }
}
