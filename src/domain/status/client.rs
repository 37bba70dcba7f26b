//! Status sub-client — liveness probe and hello endpoints.

use crate::client::{Access, EnclaveClient};
use crate::domain::status::PublicStatus;
use crate::envelope::Envelope;
use crate::error::{HttpError, SdkError};
use crate::network::PROBE_INTERVAL;
use std::time::Duration;

pub(crate) const STATUS_PATH: &str = "/status";
pub(crate) const HELLO_PATH: &str = "/hello";
pub(crate) const AUTHED_HELLO_PATH: &str = "/authedHello";

pub struct Status<'a> {
    pub(crate) client: &'a EnclaveClient,
}

impl<'a> Status<'a> {
    /// Per-market status. Never signed.
    pub async fn public_status(&self) -> Result<PublicStatus, SdkError> {
        self.client
            .get(STATUS_PATH, Access::Public)
            .await
            .map_err(SdkError::request("public status"))
    }

    /// Unauthenticated hello. Never signed.
    pub async fn hello(&self) -> Result<serde_json::Map<String, serde_json::Value>, SdkError> {
        self.client
            .get(HELLO_PATH, Access::Public)
            .await
            .map_err(SdkError::request("hello"))
    }

    /// Signed hello; succeeds only when the credentials are accepted.
    pub async fn authed_hello(&self) -> Result<String, SdkError> {
        let env: Envelope<String> = self
            .client
            .get(AUTHED_HELLO_PATH, Access::Signed)
            .await
            .map_err(SdkError::request("authed hello"))?;
        env.into_result("authed hello")
    }

    /// Poll [`Self::public_status`] every two seconds until it succeeds.
    ///
    /// There is no attempt limit. Meant for startup synchronization in tests
    /// and scripts; the only way out besides success is cancelling the client.
    pub async fn wait_for_endpoint(&self) -> Result<(), SdkError> {
        self.wait_for_endpoint_every(PROBE_INTERVAL).await
    }

    /// [`Self::wait_for_endpoint`] with a custom delay between attempts.
    pub async fn wait_for_endpoint_every(&self, interval: Duration) -> Result<(), SdkError> {
        loop {
            tracing::info!(
                base_url = self.client.base_url(),
                "Waiting for the service to become available"
            );
            match self.public_status().await {
                Ok(_) => return Ok(()),
                Err(e) if matches!(e.http(), Some(HttpError::Cancelled)) => return Err(e),
                Err(e) => {
                    tracing::debug!(error = %e, "Status probe failed");
                    futures_timer::Delay::new(interval).await;
                }
            }
        }
    }
}
