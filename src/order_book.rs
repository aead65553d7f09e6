//! Order Book - The central limit order book data structure.
//!
//! Maintains bid and ask price levels with O(1) best-price access.
//! Bids match from the highest price down, asks from the lowest price up;
//! within a level, orders match in insertion order.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::order::{Order, OrderKind, Side};
use crate::price_level::PriceLevel;

/// Sparse order book using hash maps for price levels.
///
/// Best prices are cached and only recalculated by a key scan when the
/// best level empties. Uses FxHashMap for fast non-cryptographic hashing.
pub struct OrderBook {
    /// Bid price levels (buy orders), keyed by tick price
    bids: FxHashMap<u64, PriceLevel>,
    /// Ask price levels (sell orders), keyed by tick price
    asks: FxHashMap<u64, PriceLevel>,
    /// Cached best bid price (highest buy price)
    best_bid: Option<u64>,
    /// Cached best ask price (lowest sell price)
    best_ask: Option<u64>,
    /// Total resting order count across both sides
    order_count: usize,
}

impl OrderBook {
    /// Create a new empty order book
    pub fn new() -> Self {
        Self {
            bids: FxHashMap::default(),
            asks: FxHashMap::default(),
            best_bid: None,
            best_ask: None,
            order_count: 0,
        }
    }

    /// Create a new order book with pre-allocated level capacity
    pub fn with_capacity(levels: usize) -> Self {
        Self {
            bids: FxHashMap::with_capacity_and_hasher(levels, Default::default()),
            asks: FxHashMap::with_capacity_and_hasher(levels, Default::default()),
            best_bid: None,
            best_ask: None,
            order_count: 0,
        }
    }

    // ========================================================================
    // Best Price Access
    // ========================================================================

    /// Get the best bid price (highest buy price), or `None` when no bids rest
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.best_bid
    }

    /// Get the best ask price (lowest sell price), or `None` when no asks rest
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.best_ask
    }

    /// Get the best opposite price (for matching)
    #[inline]
    pub fn best_opposite_price(&self, side: Side) -> Option<u64> {
        match side {
            Side::Buy => self.best_ask,  // Buyer matches with lowest ask
            Side::Sell => self.best_bid, // Seller matches with highest bid
        }
    }

    // ========================================================================
    // Level Access
    // ========================================================================

    /// Get a price level (immutable)
    #[inline]
    pub fn get_level(&self, side: Side, price: u64) -> Option<&PriceLevel> {
        match side {
            Side::Buy => self.bids.get(&price),
            Side::Sell => self.asks.get(&price),
        }
    }

    /// Get a price level (mutable). Crate-internal: external readers only
    /// observe snapshots and never mutate book state directly.
    #[inline]
    pub(crate) fn get_level_mut(&mut self, side: Side, price: u64) -> Option<&mut PriceLevel> {
        match side {
            Side::Buy => self.bids.get_mut(&price),
            Side::Sell => self.asks.get_mut(&price),
        }
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Add a resting order to its side of the book.
    ///
    /// The level is created if absent; within a level the order queues
    /// behind earlier arrivals at the same price.
    pub fn add(&mut self, order: Order) {
        debug_assert!(
            order.kind() == OrderKind::Limit,
            "only limit orders rest in the book"
        );
        debug_assert!(order.quantity() > 0, "resting quantity must be positive");

        let side = order.side();
        let price = order.price_ticks();

        let level = match side {
            Side::Buy => self.bids.entry(price).or_insert_with(PriceLevel::new),
            Side::Sell => self.asks.entry(price).or_insert_with(PriceLevel::new),
        };
        level.push_back(order);

        self.order_count += 1;
        self.update_best_price_on_add(side, price);
    }

    /// Remove a specific order from its side of the book.
    ///
    /// Looks the order up by id at its price level. An absent order is a
    /// non-fatal no-op: a diagnostic is logged and `None` returned, so a
    /// caller removing an already-removed (or never-rested) order is never
    /// aborted.
    pub fn remove(&mut self, order: &Order) -> Option<Order> {
        let side = order.side();
        let price = order.price_ticks();

        let removed = self
            .get_level_mut(side, price)
            .and_then(|level| level.remove_by_id(order.id()));

        match removed {
            Some(removed) => {
                self.order_count -= 1;
                if self.get_level(side, price).map_or(true, |l| l.is_empty()) {
                    self.remove_empty_level(side, price);
                }
                Some(removed)
            }
            None => {
                warn!("order {} not found in the order book", order.id());
                None
            }
        }
    }

    /// Remove and return the head order of a price level (for matching).
    ///
    /// Cleans up the level and the best-price cache when it empties.
    pub(crate) fn remove_front(&mut self, side: Side, price: u64) -> Option<Order> {
        let order = self.get_level_mut(side, price)?.pop_front()?;
        self.order_count -= 1;

        if self.get_level(side, price).map_or(true, |l| l.is_empty()) {
            self.remove_empty_level(side, price);
        }
        Some(order)
    }

    // ========================================================================
    // Level Removal
    // ========================================================================

    /// Remove an empty price level and update the best price if needed.
    fn remove_empty_level(&mut self, side: Side, price: u64) {
        match side {
            Side::Buy => {
                self.bids.remove(&price);
                if self.best_bid == Some(price) {
                    self.recalculate_best_bid();
                }
            }
            Side::Sell => {
                self.asks.remove(&price);
                if self.best_ask == Some(price) {
                    self.recalculate_best_ask();
                }
            }
        }
    }

    // ========================================================================
    // Best Price Management
    // ========================================================================

    /// Update best price cache when adding an order.
    fn update_best_price_on_add(&mut self, side: Side, price: u64) {
        match side {
            Side::Buy => {
                if self.best_bid.map_or(true, |best| price > best) {
                    self.best_bid = Some(price);
                }
            }
            Side::Sell => {
                if self.best_ask.map_or(true, |best| price < best) {
                    self.best_ask = Some(price);
                }
            }
        }
    }

    /// Recalculate best bid price by scanning all bid levels.
    /// Called when the current best bid level becomes empty.
    fn recalculate_best_bid(&mut self) {
        self.best_bid = self.bids.keys().copied().max();
    }

    /// Recalculate best ask price by scanning all ask levels.
    /// Called when the current best ask level becomes empty.
    fn recalculate_best_ask(&mut self) {
        self.best_ask = self.asks.keys().copied().min();
    }

    // ========================================================================
    // Utility Methods
    // ========================================================================

    /// Get the total number of resting orders in the book
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    /// Get the number of bid levels
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Get the number of ask levels
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Check if the book is empty
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Calculate spread (best_ask - best_bid)
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid, self.best_ask) {
            (Some(bid), Some(ask)) if ask > bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Get depth at a price level
    pub fn depth_at(&self, side: Side, price: u64) -> (u64, u32) {
        self.get_level(side, price)
            .map(|l| (l.total_qty(), l.order_count()))
            .unwrap_or((0, 0))
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("best_bid", &self.best_bid)
            .field("best_ask", &self.best_ask)
            .field("bid_levels", &self.bids.len())
            .field("ask_levels", &self.asks.len())
            .field("order_count", &self.order_count)
            .finish()
    }
}
