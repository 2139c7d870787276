use anyhow::Result;
use axum::Router;
use space_solar_lcoe::{api, config, state::AppState, telemetry};
use config::Config;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;
    let app_state = AppState::new(cfg.clone());

    let app: Router = api::router(app_state, &cfg);

    #[cfg(feature = "swagger")]
    let app = api::with_swagger(app);

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!("server binding to 0.0.0.0 - service will be accessible from the network");
    }

    info!(
        %addr,
        resolution = cfg.surface.resolution,
        "starting space solar LCOE service"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
