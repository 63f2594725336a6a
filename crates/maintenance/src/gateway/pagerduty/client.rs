//! PagerDuty maintenance window API client implementation.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use url::Url;

use super::models::{
    CreateMaintenanceWindowBody, MaintenanceWindowEnvelope, NewMaintenanceWindow,
    ServiceReference, MAINTENANCE_WINDOW_TYPE,
};
use crate::config::Config;
use crate::gateway::traits::{GatewayError, MaintenanceWindowGateway, MaintenanceWindowResult};
use crate::window::TimeWindow;

/// Versioned media type for REST API v2.
const ACCEPT_V2: &str = "application/vnd.pagerduty+json;version=2";

/// Collection path for maintenance windows.
const MAINTENANCE_WINDOWS: &str = "maintenance_windows";

/// PagerDuty maintenance window gateway.
#[derive(Clone)]
pub struct PagerDuty {
    /// HTTP client with the configured timeout.
    client: Client,
    /// API base URL.
    base_url: Url,
    /// REST API token.
    api_token: String,
}

impl PagerDuty {
    /// Create a new PagerDuty gateway from the service configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is unusable or the HTTP client cannot be created.
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| GatewayError::Client(format!("invalid base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Client(format!(
                "base URL cannot carry a path: {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_token: config.api_token.clone(),
        })
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn auth_header(&self) -> String {
        format!("Token token={}", self.api_token)
    }

    /// Read the response body, treating a read failure as a transport failure.
    async fn read_body(response: reqwest::Response) -> Result<String, GatewayError> {
        Ok(response.text().await?)
    }

    /// Parse a successful create response into a result.
    fn parse_created(body: &str) -> Result<MaintenanceWindowResult, GatewayError> {
        let raw: Map<String, Value> = serde_json::from_str(body).map_err(|e| {
            warn!(error = %e, "Failed to parse create response");
            GatewayError::MalformedResponse(format!("response is not a JSON object: {e}"))
        })?;

        let envelope: MaintenanceWindowEnvelope =
            serde_json::from_value(Value::Object(raw.clone())).map_err(|e| {
                GatewayError::MalformedResponse(format!("missing maintenance_window.id: {e}"))
            })?;

        Ok(MaintenanceWindowResult {
            id: envelope.maintenance_window.id,
            raw,
        })
    }
}

#[async_trait]
impl MaintenanceWindowGateway for PagerDuty {
    async fn create(
        &self,
        service_ids: &[String],
        window: &TimeWindow,
        description: &str,
    ) -> Result<MaintenanceWindowResult, GatewayError> {
        let url = self.url(&[MAINTENANCE_WINDOWS]);
        let body = CreateMaintenanceWindowBody {
            maintenance_window: NewMaintenanceWindow {
                resource_type: MAINTENANCE_WINDOW_TYPE,
                start_time: window.start_time(),
                end_time: window.end_time(),
                description: description.to_string(),
                services: service_ids.iter().map(ServiceReference::new).collect(),
            },
        };

        info!(
            service_count = service_ids.len(),
            start_time = %body.maintenance_window.start_time,
            end_time = %body.maintenance_window.end_time,
            "Creating maintenance window"
        );
        debug!(url = %url, "POST request");

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, ACCEPT_V2)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = Self::read_body(response).await?;

        if status != StatusCode::CREATED {
            warn!(status = status.as_u16(), "Maintenance window create rejected");
            return Err(GatewayError::UpstreamRejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let created = Self::parse_created(&text)?;
        info!(maintenance_window_id = %created.id, "Maintenance window created");
        Ok(created)
    }

    async fn delete(&self, maintenance_window_id: &str) -> Result<(), GatewayError> {
        let url = self.url(&[MAINTENANCE_WINDOWS, maintenance_window_id]);

        info!(maintenance_window_id = %maintenance_window_id, "Deleting maintenance window");
        debug!(url = %url, "DELETE request");

        let response = self
            .client
            .delete(url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, ACCEPT_V2)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            info!(maintenance_window_id = %maintenance_window_id, "Maintenance window deleted");
            return Ok(());
        }

        let text = Self::read_body(response).await?;
        warn!(
            maintenance_window_id = %maintenance_window_id,
            status = status.as_u16(),
            "Maintenance window delete rejected"
        );
        Err(GatewayError::UpstreamRejected {
            status: status.as_u16(),
            body: text,
        })
    }
}
