//! Fill domain — executions against orders.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use crate::shared::serde_util::is_empty_str;
use crate::shared::{FillId, Market, OrderId, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use wire::FillParams;

/// One (partial) execution of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub id: FillId,
    pub order_id: OrderId,
    #[serde(default, skip_serializing_if = "is_empty_str")]
    pub client_order_id: OrderId,
    pub market: Market,
    pub price: Decimal,
    /// Base-currency quantity.
    pub size: Decimal,
    pub side: Side,
    /// Quote-currency cost.
    pub filled_cost: Decimal,
    pub fee: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_rebate: Option<Decimal>,
    pub time: DateTime<Utc>,
    /// Auto-deleveraging fill.
    #[serde(rename = "isADL", default, skip_serializing_if = "Option::is_none")]
    pub is_adl: Option<bool>,
}
