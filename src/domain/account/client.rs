//! Account sub-client — balances.

use crate::client::{Access, EnclaveClient};
use crate::domain::account::{Balance, GetBalanceRequest};
use crate::envelope::Envelope;
use crate::error::SdkError;
use crate::shared::Symbol;
use reqwest::Method;

pub(crate) const GET_BALANCE_PATH: &str = "/v0/get_balance";

pub struct Account<'a> {
    pub(crate) client: &'a EnclaveClient,
}

impl<'a> Account<'a> {
    /// Balance of `symbol` for the authenticated account.
    pub async fn balance(&self, symbol: &Symbol) -> Result<Balance, SdkError> {
        let request = GetBalanceRequest::new(symbol.clone());
        let env: Envelope<Balance> = self
            .client
            .send(Method::POST, GET_BALANCE_PATH, Some(&request), Access::Signed)
            .await
            .map_err(SdkError::request("get balance"))?;
        env.into_result("get balance")
    }
}
