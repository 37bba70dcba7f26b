//! Fills sub-client — paginated listing, per-order lookups, export.

use crate::client::{Access, EnclaveClient};
use crate::domain::fill::{Fill, FillParams};
use crate::domain::order::client::{client_order_path, order_path};
use crate::envelope::{Envelope, PageResponse};
use crate::error::SdkError;
use crate::shared::OrderId;
use futures_util::Stream;
use std::collections::HashSet;

pub(crate) const FILLS_PATH: &str = "/v1/fills";
pub(crate) const FILLS_CSV_PATH: &str = "/v1/fills/csv";

pub struct Fills<'a> {
    pub(crate) client: &'a EnclaveClient,
}

impl<'a> Fills<'a> {
    /// One page of fills. The page is not enveloped.
    pub async fn list(&self, params: &FillParams) -> Result<PageResponse<Fill>, SdkError> {
        let path = format!("{}{}", FILLS_PATH, params.to_query());
        self.client
            .get(&path, Access::Signed)
            .await
            .map_err(SdkError::request("get fills"))
    }

    /// Every fill matching `params`, following `nextCursor` until it comes back empty.
    ///
    /// Pages are fetched lazily as the stream is polled. The stream ends after
    /// the first error, or when the venue hands back a cursor it already gave.
    pub fn stream(&self, params: FillParams) -> impl Stream<Item = Result<Fill, SdkError>> + 'a {
        let fills = Fills {
            client: self.client,
        };
        async_stream::try_stream! {
            let mut params = params;
            let mut seen: HashSet<String> = params.cursor.iter().cloned().collect();
            loop {
                let page = fills.list(&params).await?;
                let next = page.page_info.next().map(str::to_string);
                for fill in page.result {
                    yield fill;
                }
                match next {
                    Some(cursor) if seen.insert(cursor.clone()) => {
                        params.cursor = Some(cursor);
                    }
                    Some(cursor) => {
                        tracing::warn!(cursor = %cursor, "Venue returned a cursor it already gave, stopping");
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    pub async fn by_order_id(&self, order_id: &OrderId) -> Result<Vec<Fill>, SdkError> {
        let path = format!("{}/fills", order_path(order_id));
        self.fills_at(&path, "get fills by order id").await
    }

    pub async fn by_client_order_id(&self, client_order_id: &OrderId) -> Result<Vec<Fill>, SdkError> {
        let path = format!("{}/fills", client_order_path(client_order_id));
        self.fills_at(&path, "get fills by client order id").await
    }

    /// Fill history as CSV text, undecoded.
    pub async fn export_csv(&self) -> Result<Vec<u8>, SdkError> {
        self.client
            .get_raw(FILLS_CSV_PATH)
            .await
            .map_err(SdkError::request("export fills csv"))
    }

    async fn fills_at(&self, path: &str, operation: &'static str) -> Result<Vec<Fill>, SdkError> {
        // An order without fills comes back as `"result": null`.
        let env: Envelope<Option<Vec<Fill>>> = self
            .client
            .get(path, Access::Signed)
            .await
            .map_err(SdkError::request(operation))?;
        Ok(env.into_result(operation)?.unwrap_or_default())
    }
}
