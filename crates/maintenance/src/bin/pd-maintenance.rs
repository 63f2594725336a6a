//! pd-maintenance - create and delete PagerDuty maintenance windows.
//!
//! `serve` runs the HTTP API; `create` and `delete` perform a single call
//! from the command line and print the result.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pd_maintenance::config::{
    Config, DEFAULT_API_BASE_URL, DEFAULT_DESCRIPTION, DEFAULT_MAX_DURATION_MINUTES,
    DEFAULT_TIMEOUT_SECS,
};
use pd_maintenance::server::{self, AppState};
use pd_maintenance::{CreateWindowRequest, DeleteWindowRequest, MaintenanceService, PagerDuty};

/// Create and delete PagerDuty maintenance windows.
#[derive(Parser)]
#[command(name = "pd-maintenance")]
#[command(about = "Create and delete PagerDuty maintenance windows")]
struct Cli {
    /// PagerDuty REST API token (or set `PAGERDUTY_API_TOKEN` env var).
    #[arg(long, env = "PAGERDUTY_API_TOKEN", default_value = "", hide_env_values = true)]
    api_token: String,

    /// PagerDuty API base URL.
    #[arg(long, env = "PAGERDUTY_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Description attached to created windows.
    #[arg(long, env = "MAINTENANCE_WINDOW_DESCRIPTION", default_value = DEFAULT_DESCRIPTION)]
    description: String,

    /// Longest window a caller may request, in minutes.
    #[arg(long, env = "MAX_DURATION_MINUTES", default_value_t = DEFAULT_MAX_DURATION_MINUTES)]
    max_duration_minutes: u32,

    /// Timeout for each PagerDuty API call, in seconds.
    #[arg(long, env = "PAGERDUTY_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve {
        /// Port to listen on.
        #[arg(long, env = "PORT", default_value = "8080")]
        port: u16,
    },

    /// Create a maintenance window starting now.
    Create {
        /// Service IDs (comma-separated).
        #[arg(long, value_delimiter = ',', required = true)]
        service_ids: Vec<String>,

        /// Window length in minutes (defaults to 30, capped at the configured maximum).
        #[arg(long, allow_negative_numbers = true)]
        duration_minutes: Option<i64>,

        /// Email of the person requesting the window.
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a maintenance window.
    Delete {
        /// Maintenance window ID.
        #[arg(long)]
        id: String,

        /// Email of the person requesting the deletion.
        #[arg(long)]
        email: Option<String>,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config::new(&self.api_token)
            .with_base_url(&self.api_base_url)
            .with_description(&self.description)
            .with_max_duration_minutes(self.max_duration_minutes)
            .with_request_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "pd_maintenance=debug"
    } else {
        "pd_maintenance=info"
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    let config = cli.config();
    config.validate().context("Invalid configuration")?;
    info!(config = ?config, "Loaded configuration");

    let config = Arc::new(config);
    let gateway = PagerDuty::new(&config).context("Failed to create PagerDuty client")?;
    let service = MaintenanceService::new(config, Arc::new(gateway));

    match cli.command {
        Commands::Serve { port } => {
            let addr = format!("0.0.0.0:{port}");
            server::run_server(AppState { service }, &addr)
                .await
                .context("Server error")?;
        }
        Commands::Create {
            service_ids,
            duration_minutes,
            email,
        } => {
            let created = service
                .create(&CreateWindowRequest {
                    service_ids,
                    duration_minutes,
                    requester_email: email,
                    email_required: false,
                })
                .await
                .context("Failed to create maintenance window")?;

            println!("\n✅ Maintenance window created: {}", created.result.id);
            println!("   Start: {}", created.window.start_time());
            println!("   End:   {}", created.window.end_time());
            println!("{}", serde_json::to_string_pretty(&created.result.raw)?);
        }
        Commands::Delete { id, email } => {
            let deleted = service
                .delete(&DeleteWindowRequest {
                    maintenance_window_id: id,
                    requester_email: email,
                    email_required: false,
                })
                .await
                .context("Failed to delete maintenance window")?;

            println!("\n🗑️  {}", deleted.message());
        }
    }

    Ok(())
}
