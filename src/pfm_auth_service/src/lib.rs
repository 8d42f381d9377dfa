mod auth_service;
mod helpers;
mod sweep;
mod telemetry;

pub use auth_service::{AuthService, PostgresAuthService};
pub use helpers::{
    StartupError, build_postgres_auth_service, configure_email_client, configure_postgresql,
    get_postgres_pool,
};
pub use sweep::{spawn_expiry_sweep, sweep_once};
pub use telemetry::init_tracing;

// Re-export commonly used types
pub use pfm_auth_core::{Email, EmailClient, RefreshTokenStore, UserStore};
