//! Sample data for demos and the report binary: the stockroom tables of a
//! congregation, with rows keyed by the generated table ids.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::catalog::{Catalog, Product};
use crate::engine::{Engine, Snapshot};
use crate::row::Row;
use crate::schema::{Column, CustomTable};
use crate::value::{ColumnType, Value};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

fn table(name: &str, description: &str, columns: Vec<Column>, created: NaiveDate) -> CustomTable {
    CustomTable {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: description.to_string(),
        columns,
        created_at: created,
    }
}

fn row(table_id: &str, fields: &[(&str, Value)], created: NaiveDate) -> Row {
    let data: HashMap<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    Row::new(table_id, data, created)
}

/// The three sample tables with their rows and the four sample products.
pub fn demo_snapshot() -> Snapshot {
    let publicacoes = table(
        "Publicações CCB",
        "Controle de hinários, revistas e folhetos",
        vec![
            Column::new("Nome", ColumnType::Text, true),
            Column::new("Quantidade", ColumnType::Number, true),
            Column::new("Data de Entrada", ColumnType::Date, false),
            Column::new("Localização", ColumnType::Text, false),
        ],
        date(2024, 1, 15),
    );
    let escritorio = table(
        "Material de Escritório",
        "Canetas, papéis e outros materiais",
        vec![
            Column::new("Item", ColumnType::Text, true),
            Column::new("Quantidade", ColumnType::Number, true),
            Column::new("Fornecedor", ColumnType::Text, false),
            Column::new("Preço Unitário", ColumnType::Number, false),
        ],
        date(2024, 1, 10),
    );
    let cozinha = table(
        "Cozinha",
        "Controle de alimentos e utensílios",
        vec![
            Column::new("Nome", ColumnType::Text, true),
            Column::new("Quantidade", ColumnType::Number, true),
            Column::new("Data de Entrada", ColumnType::Date, false),
            Column::new("Localização", ColumnType::Text, false),
        ],
        date(2024, 1, 8),
    );

    let mut rows = HashMap::new();
    rows.insert(
        publicacoes.id.clone(),
        vec![
            row(
                &publicacoes.id,
                &[
                    ("Nome", "Hinário 5".into()),
                    ("Quantidade", 45.into()),
                    ("Data de Entrada", "2024-01-15".into()),
                    ("Localização", "Estante A-1".into()),
                ],
                date(2024, 1, 15),
            ),
            row(
                &publicacoes.id,
                &[
                    ("Nome", "Revista O Mensageiro".into()),
                    ("Quantidade", 120.into()),
                    ("Data de Entrada", "2024-01-14".into()),
                    ("Localização", "Estante A-2".into()),
                ],
                date(2024, 1, 14),
            ),
        ],
    );
    rows.insert(
        escritorio.id.clone(),
        vec![row(
            &escritorio.id,
            &[
                ("Item", "Canetas Azuis".into()),
                ("Quantidade", 15.into()),
                ("Fornecedor", "Bic".into()),
                ("Preço Unitário", 2.5.into()),
            ],
            date(2024, 1, 13),
        )],
    );
    rows.insert(
        cozinha.id.clone(),
        vec![
            row(
                &cozinha.id,
                &[
                    ("Nome", "Arroz".into()),
                    ("Quantidade", 10.into()),
                    ("Data de Entrada", "2024-01-10".into()),
                    ("Localização", "Despensa A".into()),
                ],
                date(2024, 1, 10),
            ),
            row(
                &cozinha.id,
                &[
                    ("Nome", "Feijão".into()),
                    ("Quantidade", 8.into()),
                    ("Data de Entrada", "2024-01-12".into()),
                    ("Localização", "Despensa A".into()),
                ],
                date(2024, 1, 12),
            ),
        ],
    );

    Snapshot {
        tables: vec![publicacoes, escritorio, cozinha],
        rows,
        products: demo_products(),
    }
}

fn product(
    name: &str,
    category: &str,
    quantity: i64,
    location: &str,
    updated: NaiveDate,
    min_stock: i64,
    custom: &[(&str, Value)],
) -> Product {
    Product {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        category: category.to_string(),
        quantity,
        location: location.to_string(),
        last_updated: updated,
        min_stock,
        custom_fields: custom
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    }
}

fn demo_products() -> Vec<Product> {
    vec![
        product(
            "Hinário 5",
            "Publicações CCB",
            45,
            "Estante A-1",
            date(2024, 1, 15),
            20,
            &[("editora", "CCB".into()), ("ano", "2023".into())],
        ),
        product(
            "Revista O Mensageiro",
            "Publicações CCB",
            120,
            "Estante A-2",
            date(2024, 1, 14),
            50,
            &[("edicao", "Janeiro 2024".into()), ("paginas", 32.into())],
        ),
        product(
            "Canetas Azuis",
            "Material de Escritório",
            15,
            "Gaveta B-1",
            date(2024, 1, 13),
            25,
            &[("marca", "Bic".into()), ("cor", "Azul".into())],
        ),
        product(
            "Folhetos Evangelísticos",
            "Publicações CCB",
            200,
            "Estante C-1",
            date(2024, 1, 12),
            100,
            &[("tema", "Salvação".into()), ("tiragem", "500".into())],
        ),
    ]
}

pub fn demo_engine() -> Engine {
    let snapshot = demo_snapshot();
    Engine::with_seeds(snapshot.tables, snapshot.rows)
}

pub fn demo_catalog() -> Catalog {
    Catalog::new(demo_products())
}
