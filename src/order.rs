//! Order types and construction-time validation.
//!
//! Orders are the only validated input surface of the engine: construction
//! is a fallible factory, and a caller never receives a half-built order.
//! Prices are fixed-point ticks internally; `rust_decimal` is used at the
//! boundary so malformed prices fail before they reach the book.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

/// External order identifier (client-assigned; uniqueness is the caller's
/// responsibility, the engine performs no uniqueness check).
pub type OrderId = u64;

/// Ticks per whole price unit (4 decimal places, e.g. 105.0 -> 1_050_000).
pub const PRICE_SCALE: u64 = 10_000;

/// Order side (buy = bid, sell = ask)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    /// Buy side (bids)
    Buy = 0,
    /// Sell side (asks)
    Sell = 1,
}

impl Side {
    /// Returns the opposite side
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl FromStr for Side {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(OrderError::InvalidSide(other.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("buy"),
            Side::Sell => f.write_str("sell"),
        }
    }
}

/// Order kind: a priced limit order or an unpriced market order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OrderKind {
    /// Rests in the book when it cannot match at its limit price
    Limit = 0,
    /// Matches at any price; residual quantity is discarded, never rested
    Market = 1,
}

impl FromStr for OrderKind {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "limit" => Ok(OrderKind::Limit),
            "market" => Ok(OrderKind::Market),
            other => Err(OrderError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Limit => f.write_str("limit"),
            OrderKind::Market => f.write_str("market"),
        }
    }
}

/// Why an order failed validation at construction
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Kind string is neither `limit` nor `market`
    #[error("order kind must be limit or market, got `{0}`")]
    InvalidKind(String),
    /// Side string is neither `buy` nor `sell`
    #[error("side must be buy or sell, got `{0}`")]
    InvalidSide(String),
    /// Price is negative, off the tick grid, or too large to represent
    #[error("price {0} is not representable on the tick grid")]
    InvalidPrice(Decimal),
    /// Quantity must be a positive unit count
    #[error("quantity must be positive")]
    ZeroQuantity,
}

/// Convert a decimal price to tick units.
///
/// Returns `None` when the price is negative, carries more precision than
/// the tick grid, or overflows the tick range.
pub fn price_to_ticks(price: Decimal) -> Option<u64> {
    if price < Decimal::ZERO {
        return None;
    }
    let scaled = price.checked_mul(Decimal::from(PRICE_SCALE))?;
    if scaled.fract() != Decimal::ZERO {
        return None;
    }
    scaled.to_u64()
}

/// Convert tick units back to a decimal price (for display and reporting).
pub fn ticks_to_price(ticks: u64) -> Decimal {
    (Decimal::from(ticks) / Decimal::from(PRICE_SCALE)).normalize()
}

/// A single buy or sell order request.
///
/// Immutable after construction except for the quantity, which only the
/// engine's partial-fill arithmetic may reduce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    kind: OrderKind,
    side: Side,
    /// Fixed-point price in ticks; ignored by matching for market orders
    price: u64,
    /// Remaining quantity to fill
    quantity: u32,
}

impl Order {
    /// Validated factory: the only way to construct an order.
    ///
    /// The price must be a well-formed non-negative decimal on the tick
    /// grid even for market orders, whose value matching then ignores.
    /// Quantity must be positive.
    pub fn new(
        id: OrderId,
        kind: OrderKind,
        side: Side,
        price: Decimal,
        quantity: u32,
    ) -> Result<Self, OrderError> {
        let ticks = price_to_ticks(price).ok_or(OrderError::InvalidPrice(price))?;
        if quantity == 0 {
            return Err(OrderError::ZeroQuantity);
        }
        Ok(Self {
            id,
            kind,
            side,
            price: ticks,
            quantity,
        })
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Price in tick units
    #[inline]
    pub fn price_ticks(&self) -> u64 {
        self.price
    }

    /// Price as a decimal
    #[inline]
    pub fn price(&self) -> Decimal {
        ticks_to_price(self.price)
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[inline]
    pub fn is_limit(&self) -> bool {
        self.kind == OrderKind::Limit
    }

    /// Reduce the remaining quantity after a partial fill.
    #[inline]
    pub(crate) fn fill(&mut self, quantity: u32) {
        debug_assert!(quantity <= self.quantity, "fill exceeds remaining quantity");
        self.quantity -= quantity;
    }

    /// Copy of this order carrying a residual quantity (for resting the
    /// unfilled remainder of a partially matched limit order).
    #[inline]
    pub(crate) fn with_quantity(mut self, quantity: u32) -> Self {
        debug_assert!(quantity > 0, "resting orders carry positive quantity");
        self.quantity = quantity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("sell".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!(
            "hold".parse::<Side>(),
            Err(OrderError::InvalidSide("hold".to_string()))
        );
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("limit".parse::<OrderKind>().unwrap(), OrderKind::Limit);
        assert_eq!("market".parse::<OrderKind>().unwrap(), OrderKind::Market);
        assert_eq!(
            "stop".parse::<OrderKind>(),
            Err(OrderError::InvalidKind("stop".to_string()))
        );
    }

    #[test]
    fn test_price_to_ticks() {
        assert_eq!(price_to_ticks(dec("105.0")), Some(1_050_000));
        assert_eq!(price_to_ticks(dec("100.5")), Some(1_005_000));
        assert_eq!(price_to_ticks(dec("0")), Some(0));
        assert_eq!(price_to_ticks(dec("0.0001")), Some(1));

        // Negative and off-grid prices are not representable
        assert_eq!(price_to_ticks(dec("-1.0")), None);
        assert_eq!(price_to_ticks(dec("100.00001")), None);
    }

    #[test]
    fn test_ticks_round_trip() {
        let ticks = price_to_ticks(dec("107.25")).unwrap();
        assert_eq!(ticks_to_price(ticks), dec("107.25"));
    }

    #[test]
    fn test_valid_limit_order() {
        let order = Order::new(1, OrderKind::Limit, Side::Buy, dec("100.0"), 4).unwrap();
        assert_eq!(order.id(), 1);
        assert_eq!(order.kind(), OrderKind::Limit);
        assert_eq!(order.side(), Side::Buy);
        assert_eq!(order.price_ticks(), 1_000_000);
        assert_eq!(order.price(), dec("100"));
        assert_eq!(order.quantity(), 4);
    }

    #[test]
    fn test_market_order_price_still_validated() {
        // Market orders carry a price the matching logic ignores, but it
        // must still be well-formed at construction.
        assert!(Order::new(4, OrderKind::Market, Side::Buy, dec("0.0"), 6).is_ok());
        assert_eq!(
            Order::new(4, OrderKind::Market, Side::Buy, dec("-1.0"), 6),
            Err(OrderError::InvalidPrice(dec("-1.0")))
        );
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert_eq!(
            Order::new(1, OrderKind::Limit, Side::Sell, dec("105.0"), 0),
            Err(OrderError::ZeroQuantity)
        );
    }

    #[test]
    fn test_fill_reduces_quantity() {
        let mut order = Order::new(1, OrderKind::Limit, Side::Sell, dec("105.0"), 5).unwrap();
        order.fill(3);
        assert_eq!(order.quantity(), 2);
    }

    #[test]
    fn test_with_quantity_keeps_identity() {
        let order = Order::new(7, OrderKind::Limit, Side::Buy, dec("109.0"), 3).unwrap();
        let residual = order.with_quantity(2);
        assert_eq!(residual.id(), 7);
        assert_eq!(residual.price_ticks(), order.price_ticks());
        assert_eq!(residual.quantity(), 2);
    }
}
