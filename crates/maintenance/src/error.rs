//! Service-level error and its HTTP rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    /// Rejected locally before any remote call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request body was not valid JSON of the expected shape.
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    /// The remote call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl Error {
    /// HTTP status mirrored to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Error::Gateway(GatewayError::UpstreamRejected { status, .. }) => {
                StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Error::Gateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short summary for the `message` field.
    fn message(&self) -> &'static str {
        match self {
            Error::Validation(_) | Error::MalformedBody(_) => "Invalid request.",
            Error::Gateway(GatewayError::UpstreamRejected { .. }) => {
                "Maintenance window request was rejected by PagerDuty."
            }
            Error::Gateway(_) => "Failed to reach PagerDuty.",
        }
    }

    /// Diagnostic detail; the remote body verbatim for upstream rejections.
    fn detail(&self) -> String {
        match self {
            Error::Gateway(GatewayError::UpstreamRejected { body, .. }) => body.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Validation(_) | Error::MalformedBody(_) => {
                tracing::debug!("Client error: {}", self);
            }
            Error::Gateway(GatewayError::UpstreamRejected { status, .. }) => {
                tracing::warn!(status, "Upstream rejected request");
            }
            Error::Gateway(_) => {
                tracing::error!("Gateway error: {:#}", self);
            }
        }

        let status = self.status_code();
        let body = json!({
            "status": "error",
            "message": self.message(),
            "detail": self.detail(),
        });
        (status, Json(body)).into_response()
    }
}
