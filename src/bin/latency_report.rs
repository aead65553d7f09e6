use hdrhistogram::Histogram;
use rust_decimal::Decimal;
use std::time::Instant;

use monobook::{MatchingEngine, Order, OrderKind, Side};

fn main() {
    println!("Preparing Latency Benchmark...");

    const ITERATIONS: usize = 1_000_000;

    // Pre-generate orders so construction stays out of the measured path.
    // Alternating sides across a narrow band keeps matching activity high.
    let orders: Vec<Order> = (0..ITERATIONS)
        .map(|i| {
            let id = i as u64 + 1;
            let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
            let price = Decimal::from(100) + Decimal::new((i % 100) as i64, 2);
            Order::new(id, OrderKind::Limit, side, price, 10).expect("generated order is valid")
        })
        .collect();

    let mut engine = MatchingEngine::with_capacity(1_000);
    let mut histogram = Histogram::<u64>::new_with_bounds(1, 100_000, 3).unwrap();

    println!("Running {} iterations...", ITERATIONS);

    let mut total_duration = std::time::Duration::new(0, 0);

    for order in orders {
        // Critical measurement section
        let start = Instant::now();
        std::hint::black_box(engine.process(order));
        let elapsed = start.elapsed();

        // Record nanoseconds; outliers beyond the bound are dropped
        histogram.record(elapsed.as_nanos() as u64).unwrap_or(());
        total_duration += elapsed;
    }

    println!("\n=== Latency Report (ns) ===");
    println!("Total Ops:  {}", ITERATIONS);
    println!(
        "Throughput: {:.2} ops/sec",
        ITERATIONS as f64 / total_duration.as_secs_f64()
    );
    println!("---------------------------");
    println!("Min:    {:6} ns", histogram.min());
    println!("P50:    {:6} ns", histogram.value_at_quantile(0.50));
    println!("P90:    {:6} ns", histogram.value_at_quantile(0.90));
    println!("P99:    {:6} ns", histogram.value_at_quantile(0.99));
    println!("P99.9:  {:6} ns", histogram.value_at_quantile(0.999));
    println!("P99.99: {:6} ns", histogram.value_at_quantile(0.9999));
    println!("Max:    {:6} ns", histogram.max());
    println!("---------------------------");
    println!("Trades executed: {}", engine.trades().len());
    println!("Resting orders:  {}", engine.order_count());
}
