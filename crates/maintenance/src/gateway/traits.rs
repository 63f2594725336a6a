//! Gateway trait and common types.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::window::TimeWindow;

/// Errors from a single remote call. None of them are retried.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The remote API answered with something other than the expected status.
    #[error("Upstream rejected request: {status} - {body}")]
    UpstreamRejected { status: u16, body: String },

    /// The call never produced a response (timeout, DNS, connection refused).
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] reqwest::Error),

    /// The remote API reported success but the body was not usable.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The HTTP client or request URL could not be built.
    #[error("Client error: {0}")]
    Client(String),
}

impl GatewayError {
    /// Whether the failure was the outbound timeout expiring.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TransportFailure(e) if e.is_timeout())
    }
}

/// A created maintenance window.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceWindowResult {
    /// Remote-assigned identifier.
    pub id: String,
    /// Response body exactly as the remote API returned it.
    pub raw: Map<String, Value>,
}

/// Remote maintenance window operations.
#[async_trait]
pub trait MaintenanceWindowGateway: Send + Sync {
    /// Create a window covering `service_ids` for the span of `window`.
    async fn create(
        &self,
        service_ids: &[String],
        window: &TimeWindow,
        description: &str,
    ) -> Result<MaintenanceWindowResult, GatewayError>;

    /// Delete the window with the given id.
    async fn delete(&self, maintenance_window_id: &str) -> Result<(), GatewayError>;
}
