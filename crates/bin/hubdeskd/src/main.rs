//! # hubdeskd — hubdesk daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`hubdesk.toml` plus env vars)
//! - Initialise `tracing` output
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use hubdesk_adapter_http_axum::state::{AppState, Ports};
use hubdesk_adapter_storage_sqlite_sqlx::{
    Config as DatabaseConfig, SqliteAutomationRepository, SqliteDeviceRepository,
    SqliteGroupRepository, SqliteHubRepository, SqliteUserRepository,
};
use hubdesk_adapter_virtual::{LogNotifier, VirtualHubGateway};
use hubdesk_app::services::account_service::AccountService;
use hubdesk_app::services::automation_service::AutomationService;
use hubdesk_app::services::device_service::DeviceService;
use hubdesk_app::services::group_service::GroupService;
use hubdesk_app::services::hub_service::HubService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Production port set: `SQLite` storage with simulated hubs.
struct SqlitePorts;

impl Ports for SqlitePorts {
    type Hubs = SqliteHubRepository;
    type Devices = SqliteDeviceRepository;
    type Groups = SqliteGroupRepository;
    type Automations = SqliteAutomationRepository;
    type Users = SqliteUserRepository;
    type Gateway = VirtualHubGateway;
    type Notifier = LogNotifier;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let hub_repo = SqliteHubRepository::new(pool.clone());
    let device_repo = SqliteDeviceRepository::new(pool.clone());
    let group_repo = SqliteGroupRepository::new(pool.clone());
    let automation_repo = SqliteAutomationRepository::new(pool.clone());
    let user_repo = SqliteUserRepository::new(pool);

    // Outside world
    let gateway = VirtualHubGateway::new(config.gateway.latest_firmware.clone());
    let notifier = LogNotifier::new();

    // Services
    let state = AppState::<SqlitePorts>::new(
        HubService::new(hub_repo.clone(), gateway.clone()),
        DeviceService::new(device_repo.clone(), hub_repo.clone()),
        GroupService::new(group_repo, device_repo.clone()),
        AutomationService::new(automation_repo, device_repo, hub_repo, gateway),
        AccountService::new(user_repo, notifier),
    );

    // HTTP
    let app = hubdesk_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "hubdeskd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("hubdeskd stopped");

    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
