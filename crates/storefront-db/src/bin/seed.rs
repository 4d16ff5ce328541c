//! # Seed Data Generator
//!
//! Populates a development database with a catalog, a few customers and a
//! sample order.
//!
//! ## Usage
//! ```bash
//! # 200 products (default) into STOREFRONT_DB_PATH or ./storefront.db
//! cargo run -p storefront-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p storefront-db --bin seed -- --count 1000 --db ./data/shop.db
//! ```
//!
//! Logging follows `RUST_LOG` (default `info,storefront=debug,sqlx=warn`).

use std::env;

use storefront_core::{NewCustomer, NewProduct, OrderLineRequest};
use storefront_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Product families for realistic test data.
const FAMILIES: &[(&str, &[&str])] = &[
    (
        "Stationery",
        &["Ballpoint Pen", "Notebook", "Sticky Notes", "Stapler", "Highlighter"],
    ),
    (
        "Kitchen",
        &["Kettle", "Chef Knife", "Cutting Board", "Mixing Bowl", "Whisk"],
    ),
    (
        "Electronics",
        &["USB Cable", "Wireless Mouse", "Keyboard", "Headphones", "Charger"],
    ),
    (
        "Outdoor",
        &["Water Bottle", "Headlamp", "Camping Mug", "Rain Jacket", "Day Pack"],
    ),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("Ada Lovelace", "ada@example.com"),
    ("Grace Hopper", "grace@example.com"),
    ("Alan Turing", "alan@example.com"),
];

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut config = DbConfig::from_env()?;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config = DbConfig::new(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: $STOREFRONT_DB_PATH or ./storefront.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(
        path = %config.database_path.display(),
        count,
        "Seeding database"
    );

    let db = Database::new(config).await?;

    let existing = db.products().count().await?;
    if existing > 0 {
        warn!(existing, "Database already has products; skipping seed");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    'families: for (family_idx, (family, names)) in FAMILIES.iter().enumerate() {
        for (name_idx, name) in names.iter().enumerate() {
            for variant in 0.. {
                if generated >= count {
                    break 'families;
                }
                // Spread products evenly across the families.
                if variant * FAMILIES.len() * names.len() >= count {
                    break;
                }

                let product = generate_product(family, name, variant, family_idx * 100 + name_idx);
                if let Err(e) = db.products().insert(&product).await {
                    warn!(name = %product.name, error = %e, "Failed to insert product");
                    continue;
                }

                generated += 1;
                if generated % 100 == 0 {
                    info!(generated, "Products generated");
                }
            }
        }
    }

    info!(generated, elapsed = ?start.elapsed(), "Catalog seeded");

    let mut customer_ids = Vec::new();
    for (name, email) in CUSTOMERS {
        let customer = db
            .customers()
            .create(&NewCustomer {
                name: name.to_string(),
                email: email.to_string(),
            })
            .await?;
        customer_ids.push(customer.id);
    }
    info!(customers = customer_ids.len(), "Customers seeded");

    // A sample order so order listings have something to show.
    let in_stock = db
        .products()
        .list(&storefront_core::ProductFilter {
            min_stock: Some(2),
            ..Default::default()
        })
        .await?;
    if let (Some(&customer_id), Some(first), Some(second)) =
        (customer_ids.first(), in_stock.first(), in_stock.get(1))
    {
        let order = db
            .orders()
            .place_order(
                customer_id,
                &[
                    OrderLineRequest::new(first.id, 2),
                    OrderLineRequest::new(second.id, 1),
                ],
            )
            .await?;
        info!(order_id = order.id, total = %order.total(), "Sample order placed");
    }

    info!("Seed complete");
    Ok(())
}

/// Generates a single product with deterministic pseudo-random data.
fn generate_product(family: &str, name: &str, variant: usize, seed: usize) -> NewProduct {
    let mix = seed * 31 + variant * 17;

    // $1.99 - $49.99
    let price_cents = 199 + ((mix * 97) % 4_800) as i64;
    // 0 - 60 units, some out of stock
    let stock = (mix % 61) as i64;

    let name = if variant == 0 {
        format!("{name} ({family})")
    } else {
        format!("{name} Mk{} ({family})", variant + 1)
    };

    NewProduct {
        name,
        price_cents,
        stock,
    }
}
