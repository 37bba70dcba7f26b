//! Account domain — per-coin balances.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use crate::shared::{AccountId, Symbol};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use wire::GetBalanceRequest;

/// Balance of one coin. `reserved` is held in open orders; `free` is the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub account_id: AccountId,
    pub symbol: Symbol,
    pub total_balance: Decimal,
    pub reserved_balance: Decimal,
    pub free_balance: Decimal,
}
