//! Status domain — venue liveness and the hello endpoints.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::Market;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reply of the public `/status` endpoint. Sent bare, without an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStatus {
    #[serde(default)]
    pub market_statuses: HashMap<Market, String>,
}

impl PublicStatus {
    pub fn market_status(&self, market: &Market) -> Option<&str> {
        self.market_statuses.get(market).map(String::as_str)
    }
}
