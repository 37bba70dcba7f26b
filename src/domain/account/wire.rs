//! Request body for the balance endpoint.

use crate::shared::Symbol;
use serde::{Deserialize, Serialize};

/// `POST /v0/get_balance` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBalanceRequest {
    pub symbol: Symbol,
}

impl GetBalanceRequest {
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_balance_request_body() {
        let body = serde_json::to_string(&GetBalanceRequest::new("AVAX")).unwrap();
        assert_eq!(body, r#"{"symbol":"AVAX"}"#);
    }
}
