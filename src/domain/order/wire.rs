//! Request body for order placement.

use crate::domain::order::{OrderType, TimeInForce};
use crate::shared::serde_util::{is_empty_str, is_false};
use crate::shared::{Market, OrderId, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `POST /v1/orders` body.
///
/// Unused numeric fields go out as `"0"`; `clientOrderId`, `timeInForce`,
/// `reduceOnly` and `postOnly` are omitted when unset.
///
/// ```rust,ignore
/// let req = AddOrderRequest::limit("AVAX-USDC", Side::Ask, price, size)
///     .with_client_order_id("my-id-1")
///     .post_only();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderRequest {
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub quote_size: Decimal,
    pub market: Market,
    #[serde(default, skip_serializing_if = "is_empty_str")]
    pub client_order_id: OrderId,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reduce_only: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub post_only: bool,
}

impl AddOrderRequest {
    /// Resting limit order for `size` base units at `price`.
    pub fn limit(market: impl Into<Market>, side: Side, price: Decimal, size: Decimal) -> Self {
        Self {
            side,
            price,
            size,
            quote_size: Decimal::ZERO,
            market: market.into(),
            client_order_id: OrderId::default(),
            order_type: OrderType::Limit,
            time_in_force: None,
            reduce_only: false,
            post_only: false,
        }
    }

    /// Market order for `size` base units.
    pub fn market(market: impl Into<Market>, side: Side, size: Decimal) -> Self {
        Self {
            order_type: OrderType::Market,
            ..Self::limit(market, side, Decimal::ZERO, size)
        }
    }

    /// Market order sized in quote units instead of base units.
    pub fn market_quote(market: impl Into<Market>, side: Side, quote_size: Decimal) -> Self {
        Self {
            quote_size,
            ..Self::market(market, side, Decimal::ZERO)
        }
    }

    pub fn with_client_order_id(mut self, id: impl Into<OrderId>) -> Self {
        self.client_order_id = id.into();
        self
    }

    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    pub fn post_only(mut self) -> Self {
        self.post_only = true;
        self
    }

    pub fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }
}
