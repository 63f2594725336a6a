//! PagerDuty maintenance window API models.

use serde::{Deserialize, Serialize};

/// Resource type tag for maintenance windows.
pub const MAINTENANCE_WINDOW_TYPE: &str = "maintenance_window";

/// Resource type tag for service references.
pub const SERVICE_REFERENCE_TYPE: &str = "service_reference";

/// Body of `POST /maintenance_windows`.
#[derive(Debug, Serialize)]
pub struct CreateMaintenanceWindowBody {
    pub maintenance_window: NewMaintenanceWindow,
}

/// Window attributes sent on create.
#[derive(Debug, Serialize)]
pub struct NewMaintenanceWindow {
    /// Always `maintenance_window`.
    #[serde(rename = "type")]
    pub resource_type: &'static str,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub services: Vec<ServiceReference>,
}

/// Reference to a service by id.
#[derive(Debug, Serialize)]
pub struct ServiceReference {
    pub id: String,
    /// Always `service_reference`.
    #[serde(rename = "type")]
    pub resource_type: &'static str,
}

impl ServiceReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: SERVICE_REFERENCE_TYPE,
        }
    }
}

/// The part of the create response we need to read.
#[derive(Debug, Deserialize)]
pub struct MaintenanceWindowEnvelope {
    pub maintenance_window: MaintenanceWindowRef,
}

/// Created window; only the id is typed, the rest stays raw.
#[derive(Debug, Deserialize)]
pub struct MaintenanceWindowRef {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_body_shape() {
        let body = CreateMaintenanceWindowBody {
            maintenance_window: NewMaintenanceWindow {
                resource_type: MAINTENANCE_WINDOW_TYPE,
                start_time: "2024-01-01T00:00:00Z".to_string(),
                end_time: "2024-01-01T00:15:00Z".to_string(),
                description: "Scheduled maintenance window".to_string(),
                services: vec![ServiceReference::new("PSVC1"), ServiceReference::new("PSVC2")],
            },
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "maintenance_window": {
                    "type": "maintenance_window",
                    "start_time": "2024-01-01T00:00:00Z",
                    "end_time": "2024-01-01T00:15:00Z",
                    "description": "Scheduled maintenance window",
                    "services": [
                        {"id": "PSVC1", "type": "service_reference"},
                        {"id": "PSVC2", "type": "service_reference"}
                    ]
                }
            })
        );
    }
}
