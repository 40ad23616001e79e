use estoque::catalog::Catalog;
use estoque::engine::{Engine, Snapshot};
use estoque::overview::{MovementLog, StockOverview};
use estoque::seed;
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <snapshot.json|--demo> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -t, --table <name>    Print the rows of one table");
        eprintln!("  -l, --low-stock       Print only the low-stock report");
        process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut table_filter: Option<String> = None;
    let mut low_stock_only = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-t" | "--table" => {
                i += 1;
                if i < args.len() {
                    table_filter = Some(args[i].clone());
                }
            }
            "-l" | "--low-stock" => {
                low_stock_only = true;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let snapshot = if args[1] == "--demo" {
        seed::demo_snapshot()
    } else {
        let input = match fs::read_to_string(&args[1]) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to read {}: {}", args[1], e);
                process::exit(1);
            }
        };
        match serde_json::from_str::<Snapshot>(&input) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Invalid snapshot: {}", e);
                process::exit(1);
            }
        }
    };

    let catalog = Catalog::new(snapshot.products.clone());
    let mut engine = Engine::with_seeds(snapshot.tables, snapshot.rows);

    if low_stock_only {
        print_low_stock(&catalog);
        return;
    }

    match table_filter {
        Some(name) => {
            let id = engine
                .tables()
                .iter()
                .find(|t| t.name == name)
                .map(|t| t.id.clone());
            match id {
                Some(id) => {
                    engine.select_table(&id);
                    print_table_rows(&engine);
                }
                None => {
                    eprintln!("Table not found: {}", name);
                    process::exit(1);
                }
            }
        }
        None => print_report(&engine, &catalog),
    }
}

fn print_report(engine: &Engine, catalog: &Catalog) {
    println!("Tabelas");
    for table in engine.tables() {
        println!(
            "  {} - {} colunas ({})",
            table.name,
            table.columns.len(),
            table.description
        );
    }

    println!();
    println!("Produtos");
    for product in catalog.products() {
        let marker = if product.is_low_stock() { " [estoque baixo]" } else { "" };
        println!(
            "  {} ({}) - {} un. em {}{}",
            product.name, product.category, product.quantity, product.location, marker
        );
    }

    println!();
    print_low_stock(catalog);
}

fn print_low_stock(catalog: &Catalog) {
    let log = MovementLog::default();
    let today = chrono::Utc::now().date_naive();
    let overview = StockOverview::build(catalog, &log, today);

    println!("Estoque baixo ({} de {})", overview.low_stock_count, overview.registered_products);
    for item in &overview.low_stock {
        println!(
            "  {} ({}) - {} / {} mínimo",
            item.name, item.category, item.current, item.minimum
        );
    }
}

fn print_table_rows(engine: &Engine) {
    let Some(table) = engine.selected_table() else {
        return;
    };
    println!("{} - {}", table.name, table.description);
    for row in engine.rows().rows() {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|col| {
                let value = row
                    .get(&col.name)
                    .map(|v| v.display())
                    .unwrap_or_else(|| "-".to_string());
                format!("{}: {}", col.name, value)
            })
            .collect();
        println!("  {}", cells.join(" | "));
    }
}
