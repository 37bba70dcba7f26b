//! Orders sub-client — place, query, cancel, export.

use crate::client::{Access, EnclaveClient};
use crate::domain::order::{AddOrderRequest, Order};
use crate::envelope::Envelope;
use crate::error::SdkError;
use crate::shared::OrderId;
use reqwest::Method;

pub(crate) const ORDERS_PATH: &str = "/v1/orders";
pub(crate) const ORDERS_CSV_PATH: &str = "/v1/orders/csv";
pub(crate) const CLIENT_ORDER_ID_PREFIX: &str = "client:";

pub struct Orders<'a> {
    pub(crate) client: &'a EnclaveClient,
}

impl<'a> Orders<'a> {
    pub async fn add(&self, request: &AddOrderRequest) -> Result<Order, SdkError> {
        let env: Envelope<Order> = self
            .client
            .send(Method::POST, ORDERS_PATH, Some(request), Access::Signed)
            .await
            .map_err(SdkError::request("add order"))?;
        env.into_result("add order")
    }

    pub async fn get(&self, order_id: &OrderId) -> Result<Order, SdkError> {
        let env: Envelope<Order> = self
            .client
            .get(&order_path(order_id), Access::Signed)
            .await
            .map_err(SdkError::request("get order"))?;
        env.into_result("get order")
    }

    pub async fn cancel(&self, order_id: &OrderId) -> Result<(), SdkError> {
        self.cancel_at(&order_path(order_id), "cancel order").await
    }

    pub async fn cancel_by_client_id(&self, client_order_id: &OrderId) -> Result<(), SdkError> {
        self.cancel_at(&client_order_path(client_order_id), "cancel order by client id")
            .await
    }

    /// Cancel every open order of the account.
    pub async fn cancel_all(&self) -> Result<(), SdkError> {
        self.cancel_at(ORDERS_PATH, "cancel all orders").await
    }

    /// Order history as CSV text, undecoded.
    pub async fn export_csv(&self) -> Result<Vec<u8>, SdkError> {
        self.client
            .get_raw(ORDERS_CSV_PATH)
            .await
            .map_err(SdkError::request("export orders csv"))
    }

    async fn cancel_at(&self, path: &str, operation: &'static str) -> Result<(), SdkError> {
        let env: Envelope<serde_json::Value> = self
            .client
            .delete(path)
            .await
            .map_err(SdkError::request(operation))?;
        env.into_result(operation).map(|_| ())
    }
}

pub(crate) fn order_path(order_id: &OrderId) -> String {
    format!("{}/{}", ORDERS_PATH, urlencoding::encode(order_id.as_str()))
}

pub(crate) fn client_order_path(client_order_id: &OrderId) -> String {
    format!(
        "{}/{}{}",
        ORDERS_PATH,
        CLIENT_ORDER_ID_PREFIX,
        urlencoding::encode(client_order_id.as_str())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_paths() {
        assert_eq!(order_path(&OrderId::from("0x6b0e")), "/v1/orders/0x6b0e");
        assert_eq!(
            client_order_path(&OrderId::from("my id")),
            "/v1/orders/client:my%20id"
        );
    }
}
