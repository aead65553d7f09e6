//! Trade records emitted by the matching engine.

use std::fmt;

use crate::order::{ticks_to_price, OrderId};

/// A single execution between a buyer and a seller.
///
/// The price is always the resting (maker) order's price, never the
/// incoming (taker) order's price. One trade is emitted per resting order
/// touched, so a single incoming order can produce several trades.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trade {
    /// Order id of the buying side
    pub buyer_order_id: OrderId,
    /// Order id of the selling side
    pub seller_order_id: OrderId,
    /// Execution price in ticks (the maker's price)
    pub price: u64,
    /// Units exchanged in this execution
    pub quantity: u32,
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trade executed: buyer={}, seller={}, price={}, quantity={}",
            self.buyer_order_id,
            self.seller_order_id,
            ticks_to_price(self.price),
            self.quantity
        )
    }
}
