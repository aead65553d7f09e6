use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use monobook::feed::OrderRow;
use monobook::order::ticks_to_price;
use monobook::MatchingEngine;

/// Replay an order CSV through the matching engine and print the trades.
#[derive(Parser)]
#[command(name = "replay", about = "Replay an order CSV through the matching engine")]
struct Args {
    /// Order CSV with columns id,kind,side,price,quantity[,timestamp]
    input: PathBuf,
    /// Print only the closing summary, not the per-trade lines
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let mut reader = csv::Reader::from_path(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;

    let mut engine = MatchingEngine::new();
    let mut processed = 0usize;

    for row in reader.deserialize::<OrderRow>() {
        let row = row.context("reading order row")?;
        let order = row
            .to_order()
            .with_context(|| format!("order {} is invalid", row.id))?;
        tracing::debug!(
            "order {}: {} {} {} x{}",
            order.id(),
            order.kind(),
            order.side(),
            order.price(),
            order.quantity()
        );
        engine.process(order);
        processed += 1;
    }

    if !args.quiet {
        for trade in engine.trades() {
            println!("{trade}");
        }
    }

    println!("Finished processing orders");
    println!("  Orders processed: {processed}");
    println!("  Trades executed:  {}", engine.trades().len());
    println!("  Resting orders:   {}", engine.order_count());
    println!("  Best bid:         {}", format_price(engine.best_bid()));
    println!("  Best ask:         {}", format_price(engine.best_ask()));
    println!("  Spread:           {}", format_price(engine.book().spread()));

    Ok(())
}

fn format_price(ticks: Option<u64>) -> String {
    match ticks {
        Some(t) => ticks_to_price(t).to_string(),
        None => "-".to_string(),
    }
}
