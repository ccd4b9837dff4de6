//! # Subcommand Handlers
//!
//! One function per CLI subcommand. Parsing and validation happen here;
//! everything below is the workspace crates doing their jobs.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;

use dyqan_checkout::{SellCoordinator, SqliteSaleStore};
use dyqan_core::sale::month_key;
use dyqan_core::{analytics, pricing, validation, DiscountRate, Money, Product, SellError};
use dyqan_db::repository::catalog::generate_product_id;
use dyqan_db::Database;

use crate::printer::FileReceiptPrinter;
use crate::{ProductFields, ProductPatch};

/// Parses a money amount from a CLI argument.
fn parse_amount(field: &str, text: &str) -> Result<Money> {
    Money::parse(text).ok_or_else(|| anyhow!("{field} '{text}' is not a valid amount"))
}

// =============================================================================
// Catalog
// =============================================================================

pub async fn product_add(db: &Database, fields: ProductFields) -> Result<()> {
    let price = parse_amount("price", &fields.price)?;
    let purchase_price = fields
        .purchase_price
        .as_deref()
        .map(|text| parse_amount("purchase price", text))
        .transpose()?;

    validation::validate_product_name(&fields.name)?;
    validation::validate_price_cents(price.cents())?;
    validation::validate_purchase_price_cents(purchase_price.map(|m| m.cents()))?;
    validation::validate_stock_qty(fields.stock)?;

    let sku = validation::validate_code("sku", fields.sku.as_deref().unwrap_or(""))?;
    let serial = validation::validate_code("serial number", fields.serial.as_deref().unwrap_or(""))?;
    let barcode = validation::validate_code("barcode", fields.barcode.as_deref().unwrap_or(""))?;

    let now = Utc::now();
    let product = Product {
        id: generate_product_id(),
        name: fields.name.trim().to_string(),
        sku,
        serial_number: serial,
        barcode,
        price_cents: price.cents(),
        purchase_price_cents: purchase_price.map(|m| m.cents()),
        stock_qty: fields.stock,
        discount_bps: DiscountRate::from_percent(fields.discount).bps(),
        active: !fields.inactive,
        image_url: fields.image_url,
        image_path: fields.image_path,
        created_at: now,
        updated_at: now,
    };

    db.catalog().insert(&product).await?;

    println!("Added product {} ({})", product.name, product.id);
    print_product(&product);
    Ok(())
}

pub async fn product_update(db: &Database, id: &str, patch: ProductPatch) -> Result<()> {
    let mut product = db
        .catalog()
        .get_by_id(id)
        .await?
        .ok_or_else(|| anyhow!("No product with id {id}"))?;

    if let Some(name) = patch.name {
        validation::validate_product_name(&name)?;
        product.name = name.trim().to_string();
    }
    if let Some(text) = patch.price {
        let price = parse_amount("price", &text)?;
        validation::validate_price_cents(price.cents())?;
        product.price_cents = price.cents();
    }
    if let Some(text) = patch.purchase_price {
        let purchase = parse_amount("purchase price", &text)?;
        validation::validate_purchase_price_cents(Some(purchase.cents()))?;
        product.purchase_price_cents = Some(purchase.cents());
    }
    if let Some(stock) = patch.stock {
        validation::validate_stock_qty(stock)?;
        product.stock_qty = stock;
    }
    if let Some(discount) = patch.discount {
        product.discount_bps = DiscountRate::from_percent(discount).bps();
    }
    if let Some(sku) = patch.sku {
        product.sku = validation::validate_code("sku", &sku)?;
    }
    if let Some(serial) = patch.serial {
        product.serial_number = validation::validate_code("serial number", &serial)?;
    }
    if let Some(barcode) = patch.barcode {
        product.barcode = validation::validate_code("barcode", &barcode)?;
    }
    if let Some(url) = patch.image_url {
        product.image_url = Some(url);
    }
    if let Some(path) = patch.image_path {
        product.image_path = Some(path);
    }

    db.catalog().update(&product).await?;

    println!("Updated product {id}");
    print_product(&product);
    Ok(())
}

pub async fn product_delete(db: &Database, id: &str) -> Result<()> {
    db.catalog().delete(id).await?;
    println!("Deleted product {id}");
    Ok(())
}

pub async fn product_set_active(db: &Database, id: &str, active: bool) -> Result<()> {
    db.catalog().set_active(id, active).await?;
    println!(
        "Product {id} is now {}",
        if active { "active" } else { "inactive" }
    );
    Ok(())
}

pub async fn product_list(db: &Database) -> Result<()> {
    let products = db.catalog().list().await?;

    if products.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    for product in &products {
        print_product(product);
    }
    println!("{} product(s)", products.len());
    Ok(())
}

pub async fn product_find(db: &Database, query: &str) -> Result<()> {
    let query = validation::validate_lookup_query(query)?;
    let products = db.catalog().lookup(&query).await?;

    if products.is_empty() {
        println!("No products match '{query}'.");
        return Ok(());
    }

    for product in &products {
        print_product(product);
    }
    Ok(())
}

fn print_product(product: &Product) {
    let quote = pricing::quote(product.price(), product.discount_rate());
    let code = product
        .barcode
        .as_deref()
        .or(product.serial_number.as_deref())
        .or(product.sku.as_deref())
        .unwrap_or("-");

    println!(
        "{}  {:<30}  {:>10}  stock {:>5}  {}  [{}]",
        product.id,
        product.name,
        quote.final_price.to_string(),
        product.stock_qty,
        if product.active { "ON " } else { "OFF" },
        code,
    );
    if !product.discount_rate().is_zero() {
        println!(
            "    was {} (-{}%)",
            product.price(),
            product.discount_rate().percent()
        );
    }
}

// =============================================================================
// Selling
// =============================================================================

pub async fn sell(db: &Database, query: &str, receipt_dir: &str) -> Result<()> {
    let query = validation::validate_lookup_query(query)?;
    let matches = db.catalog().lookup(&query).await?;

    let product = match matches.len() {
        0 => bail!("No product matches '{query}'"),
        1 => matches.into_iter().next().context("lookup returned a product")?,
        n => {
            eprintln!("'{query}' matches {n} products:");
            for p in &matches {
                print_product(p);
            }
            bail!("Refusing to sell an ambiguous match; use a more specific code");
        }
    };

    let printer = Arc::new(FileReceiptPrinter::new(receipt_dir));
    let coordinator = SellCoordinator::new(SqliteSaleStore::new(db.clone()))
        .with_printer(Arc::clone(&printer) as Arc<dyn dyqan_checkout::ReceiptPrinter>);

    match coordinator.sell(&product).await {
        Ok(completed) => {
            println!(
                "Sold 1 × {} for {}  (profit {})",
                completed.line.name_snapshot,
                completed.sale.total(),
                completed.sale.profit_total(),
            );
            println!("Invoice {}", completed.sale.invoice_no);
            println!(
                "Receipt: {}",
                printer.receipt_path(&completed.sale.invoice_no).display()
            );
            Ok(())
        }
        Err(SellError::InactiveProduct { .. }) => bail!("This product is switched off."),
        Err(SellError::OutOfStock { .. }) => bail!("Stock is 0; nothing to sell."),
        Err(SellError::StockExhausted { .. }) => {
            bail!("The last unit was just sold on another terminal.")
        }
        Err(SellError::ProductGone { .. }) => bail!("The product no longer exists."),
        Err(err @ SellError::StoreUnavailable(_)) => {
            Err(anyhow::Error::new(err).context("The sale was not recorded; it is safe to retry"))
        }
    }
}

// =============================================================================
// Dashboard
// =============================================================================

pub async fn invest(db: &Database, amount: &str, note: Option<String>) -> Result<()> {
    let amount = parse_amount("amount", amount)?;
    validation::validate_investment_amount(amount.cents())?;

    let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    let investment = db.investments().record(amount.cents(), note, Utc::now()).await?;

    println!(
        "Recorded investment of {} ({})",
        investment.amount(),
        investment.day_key
    );
    Ok(())
}

pub async fn dashboard(db: &Database, month: Option<&str>, json: bool) -> Result<()> {
    let sales = db.ledger().list().await?;
    let investments = db.investments().list().await?;
    let products = db.catalog().list().await?;

    let now = Utc::now();
    let month = month.map(String::from).unwrap_or_else(|| month_key(now));

    let stats = analytics::aggregate(&sales, &investments, &products, &month);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("== Dyqan dashboard ==");
    println!();
    println!("Month {month}");
    println!(
        "  sales   {:>12}   ({} sale(s))",
        stats.total_sales_month().to_string(),
        stats.count_sales_month
    );
    println!(
        "  profit  {:>12}",
        Money::from_cents(stats.total_profit_month_cents).to_string()
    );
    println!(
        "  invest  {:>12}",
        Money::from_cents(stats.total_invest_month_cents).to_string()
    );
    println!();
    println!("All time");
    println!(
        "  sales   {:>12}   ({} sale(s))",
        stats.total_sales_all().to_string(),
        stats.count_sales_all
    );
    println!("  profit  {:>12}", stats.total_profit_all().to_string());
    println!("  invest  {:>12}", stats.total_invest_all().to_string());
    println!();
    println!("Stock");
    println!("  units   {:>12}", stats.stock_units);
    println!(
        "  value   {:>12}   (at final prices)",
        Money::from_cents(stats.stock_value_final_cents).to_string()
    );

    let options = analytics::month_options(&sales, &investments, now);
    println!();
    println!("Months with activity: {}", options.join(", "));

    Ok(())
}
