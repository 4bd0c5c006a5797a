//! Story API server binary.
//!
//! Reads configuration from the environment (and a `.env` file when present),
//! starts file logging, opens the SQLite database and serves the router
//! until Ctrl-C.

use log::info;
use viatabloid_core::db::{open_db, open_db_in_memory};
use viatabloid_server::{router, AppState, DbLocation, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    viatabloid_core::init_logging(&config.log_level, &config.log_dir.to_string_lossy())?;

    let conn = match &config.db {
        DbLocation::Memory => open_db_in_memory()?,
        DbLocation::File(path) => open_db(path)?,
    };
    let app = router(AppState::new(conn));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(
        "event=server_start module=http status=ok addr={} version={}",
        config.addr,
        viatabloid_core::core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=http status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        log::warn!("event=server_signal module=http status=error error_code=ctrl_c_unavailable");
        std::future::pending::<()>().await;
    }
}
