//! PagerDuty maintenance windows on behalf of a caller.
//!
//! The crate creates and deletes maintenance windows for a list of services,
//! either behind a small HTTP API or from the command line.
//!
//! ## Flow
//!
//! ```text
//!   caller ──► server / CLI ──► validation ──► window ──► gateway ──► PagerDuty
//!                  ▲                                          │
//!                  └────────────── result / error ◄───────────┘
//! ```
//!
//! Validation failures never leave the process. Each request makes at most
//! one outbound call, with a bounded timeout and no retries.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pd_maintenance::{Config, MaintenanceService, PagerDuty, CreateWindowRequest};
//!
//! let config = Arc::new(Config::new(token));
//! let gateway = Arc::new(PagerDuty::new(&config)?);
//! let service = MaintenanceService::new(config, gateway);
//!
//! let created = service
//!     .create(&CreateWindowRequest {
//!         service_ids: vec!["PSVC123".into()],
//!         duration_minutes: Some(15),
//!         requester_email: Some("ops@example.com".into()),
//!         email_required: true,
//!     })
//!     .await?;
//! println!("created {}", created.result.id);
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod server;
pub mod service;
pub mod validation;
pub mod window;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use gateway::pagerduty::PagerDuty;
pub use gateway::{GatewayError, MaintenanceWindowGateway, MaintenanceWindowResult};
pub use service::{CreatedWindow, DeletedWindow, MaintenanceService};
pub use validation::{
    CreateWindowRequest, DeleteWindowRequest, ValidCreateRequest, ValidDeleteRequest,
    ValidationError,
};
pub use window::{compute_window, TimeWindow};
