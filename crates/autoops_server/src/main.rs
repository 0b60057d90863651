#![forbid(unsafe_code)]

use autoops_core::db::{open_db, open_db_in_memory};
use autoops_core::{init_logging, VehicleRegistry};
use autoops_server::{build_router, AppState, DbLocation, ServerConfig};
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    init_logging(&config.log_level, &config.log_dir)?;

    let conn = match &config.db_location {
        DbLocation::Memory => open_db_in_memory()?,
        DbLocation::File(path) => open_db(path)?,
    };
    let app = build_router(AppState::new(VehicleRegistry::new(), conn));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        "event=server_start module=server status=ok bind={} log_dir={}",
        config.bind_addr,
        config.log_dir.display()
    );
    println!(
        "autoops_server listening on http://{} (logs in {})",
        config.bind_addr,
        config.log_dir.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        info!("event=server_stop module=server status=signal_unavailable");
        std::future::pending::<()>().await;
    }
}
