pub mod auth;
pub mod backend;
pub mod catalog;
pub mod engine;
pub mod form;
pub mod notify;
pub mod overview;
pub mod row;
pub mod schema;
pub mod seed;
pub mod session;
pub mod value;

use std::collections::HashMap;

use wasm_bindgen::prelude::*;

use catalog::{Catalog, Product, ProductDraft};
use chrono::{NaiveDate, Utc};
use engine::Engine;
use overview::{MovementLog, StockOverview};
use value::ColumnType;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Browser-facing handle over the inventory core. All payloads cross the
/// boundary as JSON strings; errors are mapped to plain strings for JS.
#[wasm_bindgen]
pub struct App {
    engine: Engine,
    catalog: Catalog,
    movements: MovementLog,
}

#[wasm_bindgen]
impl App {
    #[wasm_bindgen(constructor)]
    pub fn new() -> App {
        App {
            engine: Engine::new(),
            catalog: Catalog::default(),
            movements: MovementLog::default(),
        }
    }

    /// Handle pre-loaded with the sample stockroom data.
    #[wasm_bindgen(js_name = "withDemoData")]
    pub fn with_demo_data() -> App {
        App {
            engine: seed::demo_engine(),
            catalog: seed::demo_catalog(),
            movements: MovementLog::default(),
        }
    }

    // --- custom tables ---

    pub fn tables(&self) -> Result<String, String> {
        serde_json::to_string(self.engine.tables()).map_err(|e| e.to_string())
    }

    pub fn draft(&self) -> Result<String, String> {
        serde_json::to_string(self.engine.draft()).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "draftSetName")]
    pub fn draft_set_name(&mut self, name: &str) {
        self.engine.draft_mut().name = name.to_string();
    }

    #[wasm_bindgen(js_name = "draftSetDescription")]
    pub fn draft_set_description(&mut self, description: &str) {
        self.engine.draft_mut().description = description.to_string();
    }

    #[wasm_bindgen(js_name = "draftAddColumn")]
    pub fn draft_add_column(&mut self) -> String {
        self.engine.draft_mut().add_column().id.clone()
    }

    #[wasm_bindgen(js_name = "draftSetColumnName")]
    pub fn draft_set_column_name(&mut self, id: &str, name: &str) {
        self.engine.draft_mut().set_column_name(id, name);
    }

    #[wasm_bindgen(js_name = "draftSetColumnType")]
    pub fn draft_set_column_type(&mut self, id: &str, typ: &str) -> Result<(), String> {
        let typ = ColumnType::from_str(typ).ok_or_else(|| format!("unknown column type: {typ}"))?;
        self.engine.draft_mut().set_column_type(id, typ);
        Ok(())
    }

    #[wasm_bindgen(js_name = "draftSetColumnRequired")]
    pub fn draft_set_column_required(&mut self, id: &str, required: bool) {
        self.engine.draft_mut().set_column_required(id, required);
    }

    #[wasm_bindgen(js_name = "draftRemoveColumn")]
    pub fn draft_remove_column(&mut self, id: &str) {
        self.engine.draft_mut().remove_column(id);
    }

    #[wasm_bindgen(js_name = "createTable")]
    pub fn create_table(&mut self) -> Result<String, String> {
        let notification = self.engine.create_table(today());
        serde_json::to_string(&notification).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "deleteTable")]
    pub fn delete_table(&mut self, id: &str) -> Result<String, String> {
        let notification = self.engine.delete_table(id);
        serde_json::to_string(&notification).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "selectTable")]
    pub fn select_table(&mut self, id: &str) -> bool {
        self.engine.select_table(id)
    }

    #[wasm_bindgen(js_name = "closeTable")]
    pub fn close_table(&mut self) {
        self.engine.close_table();
    }

    pub fn rows(&self) -> Result<String, String> {
        serde_json::to_string(self.engine.rows().rows()).map_err(|e| e.to_string())
    }

    /// Add a row from a `{column name: raw input}` JSON object; inputs are
    /// coerced per the column types of the selected table.
    #[wasm_bindgen(js_name = "addRow")]
    pub fn add_row(&mut self, fields_json: &str) -> Result<String, String> {
        let form = self.form_from_json(None, fields_json)?;
        let notification = self.engine.add_row(form, today());
        serde_json::to_string(&notification).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "editRow")]
    pub fn edit_row(&mut self, row_id: &str, fields_json: &str) -> Result<String, String> {
        let form = self.form_from_json(Some(row_id), fields_json)?;
        let notification = self.engine.edit_row(row_id, form);
        serde_json::to_string(&notification).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "deleteRow")]
    pub fn delete_row(&mut self, row_id: &str) -> Result<String, String> {
        let notification = self.engine.delete_row(row_id);
        serde_json::to_string(&notification).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "adjustRowQuantity")]
    pub fn adjust_row_quantity(&mut self, row_id: &str, column: &str, delta: f64) -> Option<f64> {
        self.engine.adjust_row_quantity(row_id, column, delta)
    }

    // --- product catalog ---

    pub fn products(&self) -> Result<String, String> {
        serde_json::to_string(self.catalog.products()).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "filterProducts")]
    pub fn filter_products(&self, term: &str, category: &str) -> Result<String, String> {
        serde_json::to_string(&self.catalog.filter(term, category)).map_err(|e| e.to_string())
    }

    pub fn categories(&self) -> Result<String, String> {
        serde_json::to_string(&self.catalog.categories()).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "addProduct")]
    pub fn add_product(&mut self, draft_json: &str) -> Result<String, String> {
        let draft: ProductDraft = serde_json::from_str(draft_json).map_err(|e| e.to_string())?;
        let notification = self.catalog.add(&draft, today());
        serde_json::to_string(&notification).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "updateProduct")]
    pub fn update_product(&mut self, product_json: &str) -> Result<String, String> {
        let product: Product = serde_json::from_str(product_json).map_err(|e| e.to_string())?;
        let notification = self.catalog.update(product, today());
        serde_json::to_string(&notification).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "deleteProduct")]
    pub fn delete_product(&mut self, id: &str) -> Result<String, String> {
        let notification = self.catalog.delete(id);
        serde_json::to_string(&notification).map_err(|e| e.to_string())
    }

    /// Nudge a product quantity and record the movement for the overview.
    #[wasm_bindgen(js_name = "adjustProductQuantity")]
    pub fn adjust_product_quantity(&mut self, id: &str, delta: i32) -> Option<i32> {
        let name = self.catalog.get(id)?.name.clone();
        let next = self.catalog.adjust_quantity(id, delta as i64)?;
        self.movements.record(&name, delta as i64, Utc::now());
        Some(next as i32)
    }

    pub fn overview(&self) -> Result<String, String> {
        let overview = StockOverview::build(&self.catalog, &self.movements, today());
        serde_json::to_string(&overview).map_err(|e| e.to_string())
    }
}

impl App {
    fn form_from_json(
        &self,
        row_id: Option<&str>,
        fields_json: &str,
    ) -> Result<form::RowForm, String> {
        let fields: HashMap<String, String> =
            serde_json::from_str(fields_json).map_err(|e| e.to_string())?;
        let table = self
            .engine
            .selected_table()
            .ok_or_else(|| "Nenhuma tabela selecionada".to_string())?
            .clone();
        let mut form = match row_id {
            Some(id) => self
                .engine
                .edit_row_form(id)
                .ok_or_else(|| format!("linha não encontrada: {id}"))?,
            None => form::RowForm::new(&table, None),
        };
        for (name, raw) in &fields {
            form.set_field(&table, name, raw);
        }
        Ok(form)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
