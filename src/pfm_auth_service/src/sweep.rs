use std::time::Duration;

use pfm_auth_core::RefreshTokenStore;
use tokio::{task::JoinHandle, time::MissedTickBehavior};

const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Deletes expired refresh token records every `every`, starting right away.
///
/// Failures are logged and the next tick tries again. The task runs until it
/// is aborted. Intervals below one second are raised to one second.
pub fn spawn_expiry_sweep<R>(store: R, every: Duration) -> JoinHandle<()>
where
    R: RefreshTokenStore + 'static,
{
    let every = if every < MIN_SWEEP_INTERVAL {
        tracing::warn!(requested = ?every, "Sweep interval too short, using one second");
        MIN_SWEEP_INTERVAL
    } else {
        every
    };

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            sweep_once(&store).await;
        }
    })
}

#[tracing::instrument(name = "Sweeping expired refresh tokens", skip_all)]
pub async fn sweep_once<R: RefreshTokenStore>(store: &R) -> Option<u64> {
    match store.delete_expired().await {
        Ok(deleted) => {
            tracing::info!(deleted, "Expired refresh tokens removed");
            Some(deleted)
        }
        Err(e) => {
            tracing::error!(error = %e, "Refresh token sweep failed");
            None
        }
    }
}
