//! Demo binary: seed the in-memory store and run one advisory pass.
//!
//! Usage: `shelfwise [--yes] [--date YYYY-MM-DD]`
//!   --yes    approve every recommendation (non-interactive)
//!   --date   reference date for expiry windows (defaults to today)

mod console;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};

use shelfwise_core::{Money, Product, ProductId, SalesVelocity};
use shelfwise_engine::{AdvisoryRun, ApprovalGateway, ScriptedGateway};
use shelfwise_store::{InMemoryInventoryStore, RecordingNotifier};

use console::ConsoleGateway;

struct Options {
    auto_approve: bool,
    reference_date: NaiveDate,
}

fn parse_args() -> Result<Options> {
    let mut opts = Options {
        auto_approve: false,
        reference_date: Utc::now().date_naive(),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--yes" => opts.auto_approve = true,
            "--date" => {
                let value = args.next().context("--date requires a value")?;
                opts.reference_date = value
                    .parse()
                    .with_context(|| format!("invalid date '{value}' (expected YYYY-MM-DD)"))?;
            }
            other => bail!("unknown argument '{other}'"),
        }
    }

    Ok(opts)
}

fn demo_products(reference_date: NaiveDate) -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(),
            name: "Energy Drink 500ml".to_string(),
            stock_count: 5,
            sales_velocity: SalesVelocity::High,
            expiry_date: None,
            unit_price: Money(299),
            critical_stock_threshold: 20,
            removed_from_sale: false,
        },
        Product {
            id: ProductId::new(),
            name: "Greek Yogurt 4-pack".to_string(),
            stock_count: 30,
            sales_velocity: SalesVelocity::Normal,
            expiry_date: Some(reference_date + chrono::Duration::days(2)),
            unit_price: Money(6000),
            critical_stock_threshold: 10,
            removed_from_sale: false,
        },
        Product {
            id: ProductId::new(),
            name: "Whole Milk 1L".to_string(),
            stock_count: 12,
            sales_velocity: SalesVelocity::Normal,
            expiry_date: Some(reference_date - chrono::Duration::days(1)),
            unit_price: Money(189),
            critical_stock_threshold: 8,
            removed_from_sale: false,
        },
        Product {
            id: ProductId::new(),
            name: "AA Batteries 8-pack".to_string(),
            stock_count: 200,
            sales_velocity: SalesVelocity::Low,
            expiry_date: None,
            unit_price: Money(799),
            critical_stock_threshold: 25,
            removed_from_sale: false,
        },
    ]
}

fn main() -> Result<()> {
    shelfwise_observability::init();
    let opts = parse_args()?;

    let store = Arc::new(InMemoryInventoryStore::with_products(demo_products(
        opts.reference_date,
    )));
    let notifier = Arc::new(RecordingNotifier::new());

    let gateway: Box<dyn ApprovalGateway> = if opts.auto_approve {
        Box::new(ScriptedGateway::approve_all())
    } else {
        Box::new(ConsoleGateway)
    };

    let run = AdvisoryRun::new(store.clone(), gateway, store, notifier.clone());
    let report = run
        .run(opts.reference_date)
        .context("advisory run failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    tracing::info!(
        executed = report.executed_count(),
        total = report.outcomes.len(),
        supplier_orders = notifier.orders().len(),
        "run complete"
    );

    Ok(())
}
