use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::order::{Order, OrderError, OrderKind, Side};

/// One row of an order CSV: `id,kind,side,price,quantity[,timestamp]`.
///
/// Kind and side arrive as raw strings so that unknown values surface the
/// same validation errors as direct order construction.
#[derive(Debug, Deserialize)]
pub struct OrderRow {
    pub id: u64,
    pub kind: String,
    pub side: String,
    pub price: Decimal,
    pub quantity: u32,
    /// Optional submission timestamp; carried for reporting, not matching
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl OrderRow {
    /// Convert the raw row to a validated order.
    pub fn to_order(&self) -> Result<Order, OrderError> {
        let kind: OrderKind = self.kind.parse()?;
        let side: Side = self.side.parse()?;
        Order::new(self.id, kind, side, self.price, self.quantity)
    }
}
