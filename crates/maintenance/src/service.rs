//! Create and delete operations, independent of the calling surface.
//!
//! Both the HTTP server and the command-line binary go through
//! [`MaintenanceService`], so they share one validation policy.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::gateway::{MaintenanceWindowGateway, MaintenanceWindowResult};
use crate::validation::{validate_create, validate_delete, CreateWindowRequest, DeleteWindowRequest};
use crate::window::{compute_window, TimeWindow};

/// Outcome of a successful create.
#[derive(Debug, Clone)]
pub struct CreatedWindow {
    pub requested_by: Option<String>,
    pub window: TimeWindow,
    pub result: MaintenanceWindowResult,
}

/// Outcome of a successful delete.
#[derive(Debug, Clone)]
pub struct DeletedWindow {
    pub requested_by: Option<String>,
    pub id: String,
}

impl DeletedWindow {
    /// Human-readable confirmation.
    pub fn message(&self) -> String {
        format!("Maintenance window {} deleted successfully.", self.id)
    }
}

/// Validates requests and forwards them to the gateway.
#[derive(Clone)]
pub struct MaintenanceService {
    config: Arc<Config>,
    gateway: Arc<dyn MaintenanceWindowGateway>,
}

impl MaintenanceService {
    pub fn new(config: Arc<Config>, gateway: Arc<dyn MaintenanceWindowGateway>) -> Self {
        Self { config, gateway }
    }

    /// Create a window starting now.
    pub async fn create(&self, request: &CreateWindowRequest) -> Result<CreatedWindow, Error> {
        self.create_at(request, Utc::now()).await
    }

    /// Create a window starting at `now`.
    pub async fn create_at(
        &self,
        request: &CreateWindowRequest,
        now: DateTime<Utc>,
    ) -> Result<CreatedWindow, Error> {
        let valid = validate_create(request, self.config.max_duration_minutes)?;
        let window = compute_window(valid.duration_minutes, now);
        debug!(
            duration_minutes = valid.duration_minutes,
            start_time = %window.start_time(),
            "Computed maintenance window"
        );

        let result = self
            .gateway
            .create(&valid.service_ids, &window, &self.config.description)
            .await?;

        Ok(CreatedWindow {
            requested_by: valid.requester_email,
            window,
            result,
        })
    }

    /// Delete a window by id.
    pub async fn delete(&self, request: &DeleteWindowRequest) -> Result<DeletedWindow, Error> {
        let valid = validate_delete(request)?;
        self.gateway.delete(&valid.maintenance_window_id).await?;

        Ok(DeletedWindow {
            requested_by: valid.requester_email,
            id: valid.maintenance_window_id,
        })
    }
}
