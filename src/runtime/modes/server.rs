//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with the lookup route.

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::api::services::{AppStartTime, lookup_routes};
use crate::config::get_config;
use crate::runtime::lifetime;

#[cfg(feature = "metrics")]
use crate::api::services::metrics_routes;

/// Run the HTTP server
///
/// This function:
/// 1. Records startup time
/// 2. Opens the GeoIP datasets
/// 3. Configures and starts the HTTP server
/// 4. Listens for the shutdown signal
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    // Record application start time
    let app_start_time = AppStartTime::now();

    let config = get_config();

    let startup = lifetime::startup::prepare_server_startup(&config).map_err(|e| {
        error!("Server startup failed: {:#}", e);
        e
    })?;
    let lookup_service = startup.lookup_service;

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    #[cfg(feature = "metrics")]
    let metrics_path = config.metrics.path.clone();
    #[cfg(feature = "metrics")]
    info!("Prometheus metrics available at: {}", metrics_path);

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(lookup_service.clone()))
            .app_data(web::Data::new(app_start_time.clone()));

        #[cfg(feature = "metrics")]
        let app = app.service(metrics_routes(&metrics_path));

        app.service(lookup_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: server stopped");
        }
    }

    Ok(())
}
