//! HTTP surface for maintenance window requests.

use axum::{
    body::Bytes,
    extract::{Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Error;
use crate::service::MaintenanceService;
use crate::validation::{CreateWindowRequest, DeleteWindowRequest};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: MaintenanceService,
}

/// Caller identity carried in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct RequesterQuery {
    #[serde(alias = "usermail")]
    pub user_email: Option<String>,
}

/// Body of `POST /create-maintenance-window`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateWindowBody {
    #[serde(default)]
    pub service_ids: Vec<String>,
    pub duration_minutes: Option<i64>,
}

/// Body of `DELETE /delete-maintenance-window`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteWindowBody {
    #[serde(default)]
    pub maintenance_window_id: String,
}

/// Build the HTTP router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/create-maintenance-window", post(create_window_handler))
        .route("/create-maintenance-window/", post(create_window_handler))
        .route("/delete-maintenance-window", delete(delete_window_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and run until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the server fails to bind or serve.
pub async fn run_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Maintenance window service listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Maintenance window service stopped");
    Ok(())
}

async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Welcome to the PagerDuty Maintenance Window API" }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Parse a JSON body; an empty body is treated as `{}`.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| Error::MalformedBody(e.to_string()))
}

async fn create_window_handler(
    State(state): State<AppState>,
    Query(query): Query<RequesterQuery>,
    body: Bytes,
) -> Result<Json<Value>, Error> {
    let body: CreateWindowBody = parse_body(&body)?;

    info!(
        requested_by = ?query.user_email,
        service_count = body.service_ids.len(),
        "Received create maintenance window request"
    );

    let request = CreateWindowRequest {
        service_ids: body.service_ids,
        duration_minutes: body.duration_minutes,
        requester_email: query.user_email,
        email_required: true,
    };
    let created = state.service.create(&request).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Maintenance window created successfully.",
        "requested_by": created.requested_by,
        "data": created.result.raw,
    })))
}

async fn delete_window_handler(
    State(state): State<AppState>,
    Query(query): Query<RequesterQuery>,
    body: Bytes,
) -> Result<Json<Value>, Error> {
    let body: DeleteWindowBody = parse_body(&body)?;

    info!(
        requested_by = ?query.user_email,
        maintenance_window_id = %body.maintenance_window_id,
        "Received delete maintenance window request"
    );

    let request = DeleteWindowRequest {
        maintenance_window_id: body.maintenance_window_id,
        requester_email: query.user_email,
        email_required: true,
    };
    let deleted = state.service.delete(&request).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Maintenance window deleted successfully.",
        "requested_by": deleted.requested_by,
        "data": {
            "id": deleted.id,
            "message": deleted.message(),
        },
    })))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
