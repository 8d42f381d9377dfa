use color_eyre::eyre::{Result, eyre};
use pfm_auth_adapters::{AuthServiceSetting, PostgresRefreshTokenStore};
use pfm_auth_service::{configure_postgresql, init_tracing, spawn_expiry_sweep};

/// Removes expired refresh token records on a fixed interval until Ctrl-C.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = AuthServiceSetting::load()?;

    let pg_pool = configure_postgresql(&config.postgres).await?;
    let store = PostgresRefreshTokenStore::new(pg_pool);

    let every = config.maintenance.sweep_interval();
    tracing::info!(interval_in_seconds = every.as_secs(), "Starting refresh token sweeper");

    let mut sweep = spawn_expiry_sweep(store, every);

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Shutting down refresh token sweeper");
            sweep.abort();
        }
        outcome = &mut sweep => {
            outcome?;
            return Err(eyre!("Refresh token sweep stopped unexpectedly"));
        }
    }

    Ok(())
}
