use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notify::Notification;
use crate::value::Value;

/// Fixed-schema product of the catalog view, as opposed to the rows of the
/// user-defined tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub location: String,
    pub last_updated: NaiveDate,
    pub min_stock: i64,
    #[serde(default)]
    pub custom_fields: HashMap<String, Value>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }
}

/// Input state of the new-product dialog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub location: String,
    pub min_stock: i64,
}

/// In-memory product collection with search/category filtering. Filtering
/// recomputes over the whole list per query; fine at stockroom scale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }

    /// A product matches when the category is "all" or equal, AND its name
    /// or location contains the term case-insensitively.
    pub fn filter(&self, term: &str, category: &str) -> Vec<&Product> {
        let term = term.to_lowercase();
        self.products
            .iter()
            .filter(|p| category == "all" || p.category == category)
            .filter(|p| {
                p.name.to_lowercase().contains(&term)
                    || p.location.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn low_stock_items(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }

    /// Register a product dated today. Name and category are mandatory.
    pub fn add(&mut self, draft: &ProductDraft, today: NaiveDate) -> Notification {
        if draft.name.trim().is_empty() || draft.category.trim().is_empty() {
            return Notification::error("Erro", "Nome e categoria são obrigatórios");
        }
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: draft.name.clone(),
            category: draft.category.clone(),
            quantity: draft.quantity.max(0),
            location: draft.location.clone(),
            last_updated: today,
            min_stock: draft.min_stock,
            custom_fields: HashMap::new(),
        };
        tracing::debug!(product = %product.name, "product added");
        self.products.push(product);
        Notification::success("Sucesso", "Produto adicionado com sucesso!")
    }

    /// Replace a product wholesale, refreshing `last_updated`. Unknown ids
    /// are a silent no-op; the success notification still fires, matching
    /// the optimistic behavior of the editor.
    pub fn update(&mut self, updated: Product, today: NaiveDate) -> Notification {
        if updated.name.trim().is_empty() || updated.category.trim().is_empty() {
            return Notification::error("Erro", "Nome e categoria são obrigatórios");
        }
        if let Some(product) = self.products.iter_mut().find(|p| p.id == updated.id) {
            *product = Product {
                last_updated: today,
                ..updated
            };
            tracing::debug!(product = %product.name, "product updated");
        }
        Notification::success("Sucesso", "Produto atualizado com sucesso!")
    }

    pub fn delete(&mut self, id: &str) -> Notification {
        self.products.retain(|p| p.id != id);
        Notification::success("Produto removido", "O produto foi removido com sucesso")
    }

    /// Nudge a product's quantity, clamping at zero. Returns the written
    /// value when the product exists.
    pub fn adjust_quantity(&mut self, id: &str, delta: i64) -> Option<i64> {
        let product = self.products.iter_mut().find(|p| p.id == id)?;
        product.quantity = (product.quantity + delta).max(0);
        Some(product.quantity)
    }
}
