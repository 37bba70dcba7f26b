//! Market domain — tradable pairs and order-book depth.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::serde_util::null_as_default;
use crate::shared::{BookLevel, Market};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Markets ─────────────────────────────────────────────────────────────────

/// Markets the caller is allowed to trade in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketsResult {
    #[serde(default)]
    pub spot: SpotMarkets,
}

impl MarketsResult {
    /// Spot pair by market name.
    pub fn find(&self, market: &Market) -> Option<&SpotMarket> {
        self.spot.trading_pairs.iter().find(|p| &p.market == market)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotMarkets {
    #[serde(default, deserialize_with = "null_as_default")]
    pub trading_pairs: Vec<SpotMarket>,
}

/// One spot trading pair with its size and price increments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotMarket {
    pub market: Market,
    pub base_increment: Decimal,
    #[serde(default)]
    pub pair: Option<CurrencyPair>,
    pub quote_increment: Decimal,
    #[serde(default, skip_serializing_if = "crate::shared::serde_util::is_false")]
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

// ─── Depth ───────────────────────────────────────────────────────────────────

/// Best levels on each side, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub bids: Vec<BookLevel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub asks: Vec<BookLevel>,
}

impl BookSnapshot {
    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }

    /// Best ask minus best bid, when both sides are quoted.
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
