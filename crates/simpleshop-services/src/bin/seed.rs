//! # Seed Data Generator
//!
//! Populates a SimpleShop database with demo customers, products, and
//! sales for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p simpleshop-services --bin seed
//!
//! # Specify database path and volumes
//! cargo run -p simpleshop-services --bin seed -- --db ./data/simpleshop.db --sales 40
//! ```
//!
//! ## Generated Data
//! - Customers with plausible contact details
//! - Products across a few retail categories, priced $0.99-$19.99,
//!   stocked 0-60 with varying restock thresholds
//! - Sales recorded through the real workflow, so stock levels and
//!   customer purchase totals end up consistent with the sales

use std::env;

use simpleshop_core::validation;
use simpleshop_core::{CustomerDraft, LineItem, Money, ProductDraft, SaleDraft};
use simpleshop_db::{Database, DbConfig};
use simpleshop_services::Services;

/// Demo customers: (name, email, phone, notes)
const CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    ("Maria Gonzalez", "maria.g@example.com", "555-0101", "Prefers email contact"),
    ("James Chen", "jchen@example.com", "555-0102", ""),
    ("Fatima Al-Sayed", "fatima@example.com", "555-0103", "Wholesale inquiries"),
    ("Tom Okafor", "tokafor@example.com", "555-0104", ""),
    ("Lena Petrov", "lena.p@example.com", "555-0105", "Referred by Maria"),
    ("Diego Ramos", "dramos@example.com", "555-0106", ""),
    ("Aiko Tanaka", "aiko@example.com", "555-0107", "Monthly bulk order"),
    ("Sarah Miller", "smiller@example.com", "555-0108", ""),
];

/// Demo products per category
const PRODUCTS: &[(&str, &[&str])] = &[
    (
        "Stationery",
        &[
            "Ballpoint Pens 10-Pack",
            "A5 Notebook",
            "Sticky Notes",
            "Desk Organizer",
            "Highlighter Set",
        ],
    ),
    (
        "Kitchen",
        &[
            "Ceramic Mug",
            "French Press",
            "Tea Sampler",
            "Cutting Board",
            "Olive Oil 500ml",
        ],
    ),
    (
        "Electronics",
        &[
            "USB-C Cable 1m",
            "Wireless Mouse",
            "Phone Stand",
            "Power Bank 10Ah",
            "Earbuds",
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./simpleshop_dev.db");
    let mut sale_count: usize = 25;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--sales" | "-s" => {
                if i + 1 < args.len() {
                    sale_count = args[i + 1].parse().unwrap_or(25);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("SimpleShop CRM Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>     Database file path (default: ./simpleshop_dev.db)");
                println!("  -s, --sales <N>     Number of sales to record (default: 25)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 SimpleShop CRM Seed Data Generator");
    println!("=====================================");
    println!("Database: {}", db_path);
    println!("Sales:    {}", sale_count);
    println!();

    // Connect to database
    let db = Database::new(DbConfig::new(&db_path)).await?;
    let services = Services::sqlite(&db);

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing data
    let existing = db.customers().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} customers", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Customers
    println!();
    println!("Creating customers...");
    let mut customer_ids = Vec::new();
    for (name, email, phone, notes) in CUSTOMERS {
        let draft = CustomerDraft {
            name: (*name).to_string(),
            email: (*email).to_string(),
            phone: (*phone).to_string(),
            notes: (*notes).to_string(),
        };
        validation::validate_name(&draft.name)?;
        validation::validate_email(&draft.email)?;
        let customer = services.customers.create(draft).await?;
        customer_ids.push(customer.id);
    }
    println!("✓ Created {} customers", customer_ids.len());

    // Products
    println!();
    println!("Creating products...");
    let mut products = Vec::new();
    let mut seed = 0usize;
    for (_category, names) in PRODUCTS {
        for name in *names {
            let draft = generate_product(name, seed);
            validation::validate_name(&draft.name)?;
            validation::validate_price(draft.price)?;
            validation::validate_stock(draft.stock)?;
            validation::validate_threshold(draft.low_stock_threshold)?;
            let product = services.products.create(draft).await?;
            products.push(product);
            seed += 1;
        }
    }
    println!("✓ Created {} products", db.products().count().await?);

    // Sales, recorded through the real workflow so stock and customer
    // totals come out consistent
    println!();
    println!("Recording sales...");
    let start = std::time::Instant::now();
    let mut recorded = 0;
    for n in 0..sale_count {
        let customer_id = customer_ids[n % customer_ids.len()];

        let mut items = Vec::new();
        for k in 0..(1 + n % 3) {
            let product = &products[(n * 5 + k * 7) % products.len()];
            items.push(LineItem {
                product_id: product.id,
                quantity: (1 + (n + k) % 4) as i64,
                unit_price: product.price,
            });
        }

        let total = items.iter().map(LineItem::line_total).sum();
        let draft = SaleDraft {
            customer_id,
            items,
            total,
        };
        validation::validate_sale_draft(&draft)?;

        if let Err(e) = services.sales.create(draft).await {
            eprintln!("Failed to record sale {}: {}", n + 1, e);
            continue;
        }
        recorded += 1;

        if recorded % 10 == 0 {
            println!("  Recorded {} sales...", recorded);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Recorded {} sales in {:?}", recorded, elapsed);

    // Show the dashboard the way the frontend would
    println!();
    println!("Dashboard summary:");
    let summary = services.dashboard.summary().await;
    println!("  Today's sales:   {}", summary.revenue_today);
    println!("  This month:      {}", summary.revenue_this_month);
    println!("  Total customers: {}", summary.customer_count);
    println!("  Low stock:       {}", summary.low_stock_count);

    for product in services.dashboard.stock_alerts().await {
        println!(
            "    ⚠ {} — {} left (threshold {})",
            product.name, product.stock, product.low_stock_threshold
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with plausible data.
fn generate_product(name: &str, seed: usize) -> ProductDraft {
    // Price: $0.99 - $19.99
    let price_cents = 99 + ((seed * 137) % 1900) as i64;

    // Stock 0-60, threshold 2-7; a few start at/below threshold so the
    // dashboard has alerts to show
    let stock = ((seed * 11) % 61) as i64;
    let low_stock_threshold = (2 + seed % 6) as i64;

    ProductDraft {
        name: name.to_string(),
        price: Money::from_cents(price_cents),
        stock,
        low_stock_threshold,
    }
}
