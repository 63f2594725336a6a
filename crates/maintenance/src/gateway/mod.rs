//! Outbound calls to the incident-management platform.
//!
//! The [`MaintenanceWindowGateway`] trait is the only seam through which the
//! service talks to the remote API. [`pagerduty::PagerDuty`] is the production
//! implementation.

pub mod pagerduty;
pub mod traits;

pub use traits::{GatewayError, MaintenanceWindowGateway, MaintenanceWindowResult};
