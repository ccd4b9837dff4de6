//! # dyqan: POS terminal CLI
//!
//! Thin orchestration layer over the workspace crates. Every subcommand
//! maps to one of the three screens of the shop app: catalog management
//! (`product ...`), the sales screen (`sell`), and the admin dashboard
//! (`invest`, `dashboard`).

mod commands;
mod config;
mod printer;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dyqan_db::{Database, DbConfig};

#[derive(Debug, Parser)]
#[command(name = "dyqan", about = "Point-of-sale and inventory for a small shop", version)]
struct Cli {
    /// Path to the SQLite database (overrides DYQAN_DB)
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage the product catalog
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Sell one unit of a product found by barcode, serial, SKU or name
    Sell {
        /// Lookup query; must match exactly one product
        query: String,

        /// Directory receipts are written to
        #[arg(long, default_value = "receipts")]
        receipt_dir: String,
    },

    /// Record an owner investment (goods bought for the shop)
    Invest {
        /// Amount spent, e.g. 1200 or 1200.50
        amount: String,

        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },

    /// Show aggregated sales, profit, investment and stock figures
    Dashboard {
        /// Month to scope to (YYYY-MM); defaults to the current month
        #[arg(long)]
        month: Option<String>,

        /// Emit the figures as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ProductAction {
    /// Add a product to the catalog
    Add(ProductFields),

    /// Update an existing product
    Update {
        /// Product ID
        id: String,

        #[command(flatten)]
        fields: ProductPatch,
    },

    /// Delete a product from the catalog
    Delete {
        /// Product ID
        id: String,
    },

    /// Make a product sellable
    Activate {
        /// Product ID
        id: String,
    },

    /// Take a product off sale without deleting it
    Deactivate {
        /// Product ID
        id: String,
    },

    /// List the whole catalog, newest first
    List,

    /// Look up products by barcode, serial, SKU or name
    Find {
        /// Substring to search for
        query: String,
    },
}

#[derive(Debug, Args)]
struct ProductFields {
    /// Product name
    #[arg(long)]
    name: String,

    /// Selling price, e.g. 19.99
    #[arg(long)]
    price: String,

    /// Purchase cost, e.g. 12.00
    #[arg(long)]
    purchase_price: Option<String>,

    /// Units on hand
    #[arg(long, default_value_t = 0)]
    stock: i64,

    /// Discount percent (0-100)
    #[arg(long, default_value_t = 0.0)]
    discount: f64,

    /// Stock keeping unit
    #[arg(long)]
    sku: Option<String>,

    /// Serial number
    #[arg(long)]
    serial: Option<String>,

    /// Barcode
    #[arg(long)]
    barcode: Option<String>,

    /// Product image URL
    #[arg(long)]
    image_url: Option<String>,

    /// Product image storage path
    #[arg(long)]
    image_path: Option<String>,

    /// Create the product switched off
    #[arg(long)]
    inactive: bool,
}

/// Partial update; only the flags that are present change the product.
#[derive(Debug, Args)]
struct ProductPatch {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    price: Option<String>,

    #[arg(long)]
    purchase_price: Option<String>,

    #[arg(long)]
    stock: Option<i64>,

    #[arg(long)]
    discount: Option<f64>,

    #[arg(long)]
    sku: Option<String>,

    #[arg(long)]
    serial: Option<String>,

    #[arg(long)]
    barcode: Option<String>,

    #[arg(long)]
    image_url: Option<String>,

    #[arg(long)]
    image_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments set DYQAN_DB in the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let db_path = config::database_path(cli.db.as_deref());
    let db = Database::new(DbConfig::new(&db_path)).await?;

    match cli.command {
        Command::Product { action } => match action {
            ProductAction::Add(fields) => commands::product_add(&db, fields).await?,
            ProductAction::Update { id, fields } => commands::product_update(&db, &id, fields).await?,
            ProductAction::Delete { id } => commands::product_delete(&db, &id).await?,
            ProductAction::Activate { id } => commands::product_set_active(&db, &id, true).await?,
            ProductAction::Deactivate { id } => commands::product_set_active(&db, &id, false).await?,
            ProductAction::List => commands::product_list(&db).await?,
            ProductAction::Find { query } => commands::product_find(&db, &query).await?,
        },
        Command::Sell { query, receipt_dir } => commands::sell(&db, &query, &receipt_dir).await?,
        Command::Invest { amount, note } => commands::invest(&db, &amount, note).await?,
        Command::Dashboard { month, json } => {
            commands::dashboard(&db, month.as_deref(), json).await?
        }
    }

    Ok(())
}
