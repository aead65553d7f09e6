//! Matching Engine - Core order matching algorithm.
//!
//! Implements the cross/rest algorithm:
//! 1. CROSSING: Match incoming orders against the opposite side
//! 2. RESTING: Place remaining limit quantity in the book
//!
//! Market orders cross without a price bound and any unfilled residual is
//! discarded. Limit orders cross only while their price is favorable and
//! rest any residual at their limit price.

use tracing::debug;

use crate::order::{Order, OrderKind, Side};
use crate::order_book::OrderBook;
use crate::trade::Trade;

/// The matching engine core.
///
/// Owns the order book and an append-only trade ledger. `process` is
/// synchronous call-and-return; the caller serializes invocations.
pub struct MatchingEngine {
    /// The limit order book
    book: OrderBook,
    /// Every trade executed so far, in execution order
    trades: Vec<Trade>,
}

impl MatchingEngine {
    /// Create a new matching engine with an empty book and ledger
    pub fn new() -> Self {
        Self {
            book: OrderBook::new(),
            trades: Vec::new(),
        }
    }

    /// Create a matching engine with pre-allocated price-level capacity
    pub fn with_capacity(levels: usize) -> Self {
        Self {
            book: OrderBook::with_capacity(levels),
            trades: Vec::new(),
        }
    }

    /// Process one incoming order.
    ///
    /// # Algorithm
    /// 1. Market orders cross unconditionally against the opposite side;
    ///    a residual that exhausts the book is discarded, never rested.
    /// 2. Limit orders cross only if they reach the opposite best price;
    ///    otherwise (or once crossing stops) the unfilled quantity rests.
    ///
    /// Matching itself never fails; invalid orders are rejected earlier,
    /// at construction.
    pub fn process(&mut self, order: Order) {
        match order.kind() {
            OrderKind::Market => {
                let remaining = self.cross(&order);
                if remaining > 0 {
                    debug!(
                        "market order {} discarded with {} unfilled units",
                        order.id(),
                        remaining
                    );
                }
            }
            OrderKind::Limit => {
                let crosses = self
                    .book
                    .best_opposite_price(order.side())
                    .map_or(false, |best| {
                        prices_cross(order.side(), order.price_ticks(), best)
                    });

                let remaining = if crosses {
                    self.cross(&order)
                } else {
                    order.quantity()
                };

                if remaining > 0 {
                    self.book.add(order.with_quantity(remaining));
                }
            }
        }
    }

    /// Cross (match) an incoming order against the opposite side.
    ///
    /// # Returns
    /// Quantity still unfilled when crossing stops
    fn cross(&mut self, taker: &Order) -> u32 {
        let maker_side = taker.side().opposite();
        let mut remaining = taker.quantity();

        loop {
            if remaining == 0 {
                break;
            }

            // Get best opposite price
            let best_opposite = match self.book.best_opposite_price(taker.side()) {
                Some(price) => price,
                None => break, // No orders on opposite side
            };

            // The opposite side is price-ordered: the moment the best price
            // stops being favorable, no deeper level can be favorable either
            if taker.is_limit() && !prices_cross(taker.side(), taker.price_ticks(), best_opposite)
            {
                break;
            }

            remaining = self.match_at_level(taker, best_opposite, maker_side, remaining);
        }

        remaining
    }

    /// Match against the FIFO queue of resting orders at one price level.
    ///
    /// # Returns
    /// Remaining quantity after matching at this level
    fn match_at_level(
        &mut self,
        taker: &Order,
        price: u64,
        maker_side: Side,
        mut remaining: u32,
    ) -> u32 {
        while remaining > 0 {
            // Head order at this level (oldest = highest priority)
            let (maker_id, maker_qty) = match self
                .book
                .get_level(maker_side, price)
                .and_then(|level| level.front())
            {
                Some(maker) => (maker.id(), maker.quantity()),
                None => break,
            };

            // The resting order is the maker, the incoming order the taker;
            // trades always execute at the maker's price
            let (buyer_order_id, seller_order_id) = match taker.side() {
                Side::Buy => (taker.id(), maker_id),
                Side::Sell => (maker_id, taker.id()),
            };

            if maker_qty <= remaining {
                // Resting order fully consumed: trade its whole quantity
                // and move on to the next entry in the queue
                self.trades.push(Trade {
                    buyer_order_id,
                    seller_order_id,
                    price,
                    quantity: maker_qty,
                });
                remaining -= maker_qty;
                self.book.remove_front(maker_side, price);
            } else {
                // Incoming order fully filled: trade exactly what it still
                // needs and reduce the resting order in place
                self.trades.push(Trade {
                    buyer_order_id,
                    seller_order_id,
                    price,
                    quantity: remaining,
                });
                if let Some(level) = self.book.get_level_mut(maker_side, price) {
                    level.fill_front(remaining);
                }
                remaining = 0;
            }
        }

        remaining
    }

    // ========================================================================
    // Read Access
    // ========================================================================

    /// All trades executed so far, oldest first.
    ///
    /// Snapshot view: repeated calls without an intervening `process`
    /// observe an identical sequence.
    #[inline]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Read access to the order book
    #[inline]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Get the best bid price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.book.best_bid()
    }

    /// Get the best ask price
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.book.best_ask()
    }

    /// Get total resting order count
    #[inline]
    pub fn order_count(&self) -> usize {
        self.book.order_count()
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if an incoming limit price crosses the opposite best price.
#[inline]
fn prices_cross(taker_side: Side, taker_price: u64, opposite_best: u64) -> bool {
    match taker_side {
        // Buyer willing to pay >= lowest ask
        Side::Buy => taker_price >= opposite_best,
        // Seller willing to accept <= highest bid
        Side::Sell => taker_price <= opposite_best,
    }
}
