//! Markets sub-client — tradable pairs and depth.

use crate::client::{Access, EnclaveClient};
use crate::domain::market::{BookSnapshot, MarketsResult};
use crate::envelope::Envelope;
use crate::error::SdkError;
use crate::shared::Market;

pub(crate) const MARKETS_PATH: &str = "/v1/markets";
pub(crate) const DEPTH_PATH: &str = "/v1/depth";

pub struct Markets<'a> {
    pub(crate) client: &'a EnclaveClient,
}

impl<'a> Markets<'a> {
    /// All markets the account may trade.
    pub async fn list(&self) -> Result<MarketsResult, SdkError> {
        let env: Envelope<MarketsResult> = self
            .client
            .get(MARKETS_PATH, Access::Signed)
            .await
            .map_err(SdkError::request("get markets"))?;
        env.into_result("get markets")
    }

    /// Order-book depth for `market`.
    pub async fn depth(&self, market: &Market) -> Result<BookSnapshot, SdkError> {
        let path = depth_path(market);
        let env: Envelope<BookSnapshot> = self
            .client
            .get(&path, Access::Signed)
            .await
            .map_err(SdkError::request("get depth"))?;
        env.into_result("get depth")
    }
}

pub(crate) fn depth_path(market: &Market) -> String {
    format!("{}?market={}", DEPTH_PATH, urlencoding::encode(market.as_str()))
}
