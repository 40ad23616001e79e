use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementAction {
    Entrada,
    Saida,
}

/// One recorded stock movement, kept for the overview screen only; nothing
/// here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub product: String,
    pub action: MovementAction,
    pub quantity: i64,
    pub at: DateTime<Utc>,
}

/// Session-scoped log of quantity changes, newest last.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovementLog {
    movements: Vec<Movement>,
}

impl MovementLog {
    /// Record a quantity change. Zero deltas are not movements.
    pub fn record(&mut self, product: &str, delta: i64, at: DateTime<Utc>) {
        if delta == 0 {
            return;
        }
        let action = if delta > 0 {
            MovementAction::Entrada
        } else {
            MovementAction::Saida
        };
        self.movements.push(Movement {
            product: product.to_string(),
            action,
            quantity: delta.abs(),
            at,
        });
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Latest movements, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&Movement> {
        self.movements.iter().rev().take(limit).collect()
    }

    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.movements
            .iter()
            .filter(|m| m.at.date_naive() == date)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockItem {
    pub name: String,
    pub category: String,
    pub current: i64,
    pub minimum: i64,
}

/// Snapshot of the overview screen, derived from live catalog state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockOverview {
    pub registered_products: usize,
    pub low_stock_count: usize,
    pub movements_today: usize,
    pub recent_movements: Vec<Movement>,
    pub low_stock: Vec<LowStockItem>,
}

impl StockOverview {
    pub fn build(catalog: &Catalog, log: &MovementLog, today: NaiveDate) -> Self {
        let low_stock: Vec<LowStockItem> = catalog
            .low_stock_items()
            .into_iter()
            .map(|p| LowStockItem {
                name: p.name.clone(),
                category: p.category.clone(),
                current: p.quantity,
                minimum: p.min_stock,
            })
            .collect();

        Self {
            registered_products: catalog.products().len(),
            low_stock_count: low_stock.len(),
            movements_today: log.count_on(today),
            recent_movements: log.recent(4).into_iter().cloned().collect(),
            low_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductDraft;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_record_classifies_direction() {
        let mut log = MovementLog::default();
        log.record("Hinário 5", 50, at(14));
        log.record("Revista Mensageiro", -20, at(13));
        log.record("Folhetos", 0, at(12));

        assert_eq!(log.movements().len(), 2, "zero delta is not a movement");
        assert_eq!(log.movements()[0].action, MovementAction::Entrada);
        assert_eq!(log.movements()[1].action, MovementAction::Saida);
        assert_eq!(log.movements()[1].quantity, 20);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut log = MovementLog::default();
        log.record("A", 1, at(10));
        log.record("B", 2, at(11));
        log.record("C", 3, at(12));

        let recent = log.recent(2);
        assert_eq!(recent[0].product, "C");
        assert_eq!(recent[1].product, "B");
    }

    #[test]
    fn test_count_on_filters_by_date() {
        let mut log = MovementLog::default();
        log.record("A", 1, at(10));
        log.record("B", -1, Utc.with_ymd_and_hms(2024, 1, 14, 16, 20, 0).unwrap());
        assert_eq!(log.count_on(today()), 1);
    }

    #[test]
    fn test_overview_from_live_state() {
        let mut catalog = Catalog::default();
        catalog.add(
            &ProductDraft {
                name: "Hinário 4".into(),
                category: "Publicações".into(),
                quantity: 5,
                location: "Estante A".into(),
                min_stock: 20,
            },
            today(),
        );
        catalog.add(
            &ProductDraft {
                name: "Canetas".into(),
                category: "Escritório".into(),
                quantity: 100,
                location: "Gaveta B".into(),
                min_stock: 25,
            },
            today(),
        );

        let mut log = MovementLog::default();
        log.record("Hinário 4", 5, at(14));

        let overview = StockOverview::build(&catalog, &log, today());
        assert_eq!(overview.registered_products, 2);
        assert_eq!(overview.low_stock_count, 1);
        assert_eq!(overview.movements_today, 1);
        assert_eq!(overview.low_stock[0].name, "Hinário 4");
        assert_eq!(overview.low_stock[0].current, 5);
        assert_eq!(overview.low_stock[0].minimum, 20);
    }
}
