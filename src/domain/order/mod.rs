//! Order domain — order records and their closed-set enums.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use crate::shared::serde_util::{self, is_empty_str, is_false};
use crate::shared::{Market, OrderId, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

pub use wire::AddOrderRequest;

/// Implements `Serialize` as the token and `Deserialize` through `FromStr`.
macro_rules! token_serde {
    ($name:ident) => {
        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                serde_util::from_token(deserializer)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

// ─── OrderType ───────────────────────────────────────────────────────────────

/// Wire format `"limit"` / `"market"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderType {
    #[default]
    Limit,
    Market,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
        }
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "limit" => Ok(OrderType::Limit),
            "market" => Ok(OrderType::Market),
            _ => Err(format!("invalid order type: {}", s)),
        }
    }
}

token_serde!(OrderType);

// ─── TimeInForce ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeInForce {
    GoodTilCancelled,
    ImmediateOrCancel,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::GoodTilCancelled => "GTC",
            TimeInForce::ImmediateOrCancel => "IOC",
        }
    }
}

impl FromStr for TimeInForce {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GTC" => Ok(TimeInForce::GoodTilCancelled),
            "IOC" => Ok(TimeInForce::ImmediateOrCancel),
            _ => Err(format!("invalid time in force: {}", s)),
        }
    }
}

token_serde!(TimeInForce);

// ─── OrderState ──────────────────────────────────────────────────────────────

/// Lifecycle state. Serialized lowercase; decoded case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderState {
    /// Accepted by the API, not yet on the matching engine.
    New,
    Open,
    FullyFilled,
    /// Canceled, possibly after partial fills.
    Canceled,
    CancelRejected,
    Rejected,
}

impl OrderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::New => "new",
            OrderState::Open => "open",
            OrderState::FullyFilled => "fullyfilled",
            OrderState::Canceled => "canceled",
            OrderState::CancelRejected => "cancelrejected",
            OrderState::Rejected => "rejected",
        }
    }

    /// No further fills or cancels can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderState::FullyFilled | OrderState::Canceled | OrderState::Rejected
        )
    }
}

impl FromStr for OrderState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(OrderState::New),
            "open" => Ok(OrderState::Open),
            "fullyfilled" => Ok(OrderState::FullyFilled),
            "canceled" => Ok(OrderState::Canceled),
            "cancelrejected" => Ok(OrderState::CancelRejected),
            "rejected" => Ok(OrderState::Rejected),
            _ => Err(format!("invalid OrderState: {}", s)),
        }
    }
}

token_serde!(OrderState);

// ─── CancelReason ────────────────────────────────────────────────────────────

/// Why an order was canceled. The empty token is a user-initiated cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CancelReason {
    #[default]
    User,
    Liquidation,
    SelfMatchPrevention,
    /// Cancel-on-disconnect fired.
    CancelAfterTimeout,
    StartupBadPrice,
    ImmediateOrCancel,
    CancelAfterTimeoutOnShutdown,
    CancelOnStartup,
    CancelByAdmin,
}

impl CancelReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CancelReason::User => "",
            CancelReason::Liquidation => "liquidation",
            CancelReason::SelfMatchPrevention => "selfmatchprevention",
            CancelReason::CancelAfterTimeout => "cancelaftertimeout",
            CancelReason::StartupBadPrice => "startupbadprice",
            CancelReason::ImmediateOrCancel => "immediateorcancel",
            CancelReason::CancelAfterTimeoutOnShutdown => "cancelaftertimeoutonshutdown",
            CancelReason::CancelOnStartup => "cancelonstartup",
            CancelReason::CancelByAdmin => "cancelbyadmin",
        }
    }

    pub fn is_user(&self) -> bool {
        *self == CancelReason::User
    }
}

impl FromStr for CancelReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" => Ok(CancelReason::User),
            "liquidation" => Ok(CancelReason::Liquidation),
            "selfmatchprevention" => Ok(CancelReason::SelfMatchPrevention),
            "cancelaftertimeout" => Ok(CancelReason::CancelAfterTimeout),
            "startupbadprice" => Ok(CancelReason::StartupBadPrice),
            "immediateorcancel" => Ok(CancelReason::ImmediateOrCancel),
            "cancelaftertimeoutonshutdown" => Ok(CancelReason::CancelAfterTimeoutOnShutdown),
            "cancelonstartup" => Ok(CancelReason::CancelOnStartup),
            "cancelbyadmin" => Ok(CancelReason::CancelByAdmin),
            _ => Err(format!("invalid CancelReason: {}", s)),
        }
    }
}

token_serde!(CancelReason);

// ─── Order ───────────────────────────────────────────────────────────────────

/// An order as reported by the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default, skip_serializing_if = "is_empty_str")]
    pub client_order_id: OrderId,
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub market: Market,
    pub filled_size: Decimal,
    pub filled_cost: Decimal,
    pub fee: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_rebate: Option<Decimal>,
    pub status: OrderState,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "CancelReason::is_user")]
    pub cancel_reason: CancelReason,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(
        default,
        deserialize_with = "serde_util::optional_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reduce_only: bool,
}

impl Order {
    pub fn remaining_size(&self) -> Decimal {
        (self.size - self.filled_size).max(Decimal::ZERO)
    }

    /// `filled_cost / filled_size`, or `None` before the first fill.
    pub fn average_fill_price(&self) -> Option<Decimal> {
        if self.filled_size.is_zero() {
            None
        } else {
            Some(self.filled_cost / self.filled_size)
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == OrderState::Open
    }
}
