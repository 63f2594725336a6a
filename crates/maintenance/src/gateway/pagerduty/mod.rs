//! PagerDuty REST API v2 maintenance window client.
//!
//! ## Example
//!
//! ```ignore
//! use pd_maintenance::gateway::pagerduty::PagerDuty;
//! use pd_maintenance::gateway::MaintenanceWindowGateway;
//! use pd_maintenance::window::compute_window;
//!
//! let gateway = PagerDuty::new(&config)?;
//! let window = compute_window(15, chrono::Utc::now());
//! let created = gateway
//!     .create(&["PSVC123".to_string()], &window, "Deploy")
//!     .await?;
//! gateway.delete(&created.id).await?;
//! ```

mod client;
mod models;

pub use client::PagerDuty;
pub use models::*;
