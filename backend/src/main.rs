//! Shopping-list entry-point: loads settings, prepares the database and
//! serves the HTML interface.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shopping_list::config::AppSettings;
use shopping_list::inbound::http::health::HealthState;
use shopping_list::outbound::persistence::{DbPool, ensure_schema};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let pool_config = settings.pool_config()?;
    info!(pool = ?pool_config, "connecting to database");

    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;
    ensure_schema(&pool)
        .await
        .wrap_err("failed to ensure the items table")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, pool))?;
    server.await?;

    health_state.mark_unhealthy();
    info!("server stopped");
    Ok(())
}
