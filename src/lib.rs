//! # Monobook
//!
//! A single-instrument limit order matching engine with price-time priority.
//!
//! ## Design Principles
//!
//! - **Synchronous Core**: One caller drives `process()` call-and-return (no locks)
//! - **Price-Time Priority**: Best price first, FIFO within a price level
//! - **Maker Pricing**: Trades always execute at the resting order's price
//! - **Validate Once**: Orders are checked at construction, matching is total
//!
//! ## Architecture
//!
//! ```text
//! [Order Source] --> MatchingEngine::process() --> [Trade Ledger]
//!                            |
//!                       [OrderBook]
//! ```

pub mod order;
pub mod trade;
pub mod price_level;
pub mod order_book;
pub mod matching;
pub mod feed;

// Re-exports for convenience
pub use order::{Order, OrderError, OrderId, OrderKind, Side, PRICE_SCALE};
pub use trade::Trade;
pub use price_level::PriceLevel;
pub use order_book::OrderBook;
pub use matching::MatchingEngine;
