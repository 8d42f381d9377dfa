use config::ConfigError;
use pfm_auth_adapters::{
    Argon2PasswordHasher, AuthServiceSetting, JwtSignerConfig, JwtTokenSigner,
    PostgresRefreshTokenStore, PostgresUserStore, PostmarkEmailClient,
    config::{EmailClientSetting, PostgresSetting},
};
use pfm_auth_core::{Email, UserError};
use reqwest::Client as HttpClient;
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions};
use thiserror::Error;

use crate::auth_service::{AuthService, PostgresAuthService};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to connect to PostgreSQL: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Failed to run migrations: {0}")]
    Migration(#[from] MigrateError),
    #[error("Invalid email sender: {0}")]
    InvalidSender(#[from] UserError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Invalid setting: {0}")]
    InvalidSetting(#[from] ConfigError),
}

/// Configure and return a PostgreSQL connection pool
///
/// Creates the pool and runs all pending migrations.
///
/// # Arguments
/// * `setting` - Connection URL and pool size
///
/// # Returns
/// A configured PgPool ready for use
pub async fn configure_postgresql(setting: &PostgresSetting) -> Result<PgPool, StartupError> {
    let pg_pool = get_postgres_pool(setting.url.expose_secret(), setting.max_connections).await?;

    sqlx::migrate!().run(&pg_pool).await?;

    Ok(pg_pool)
}

/// Create a PostgreSQL connection pool
///
/// # Arguments
/// * `url` - Database connection URL
/// * `max_connections` - Upper bound on pooled connections
///
/// # Returns
/// Result containing the PgPool or an error
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

pub fn configure_email_client(
    setting: &EmailClientSetting,
) -> Result<PostmarkEmailClient, StartupError> {
    let http_client = HttpClient::builder().timeout(setting.timeout()).build()?;
    let sender = Email::try_from(Secret::new(setting.sender.clone()))?;

    Ok(PostmarkEmailClient::new(
        setting.base_url.clone(),
        sender,
        setting.auth_token.clone(),
        http_client,
    ))
}

/// Wire the deployed service from configuration: connect, migrate and build
/// every collaborator.
pub async fn build_postgres_auth_service(
    setting: &AuthServiceSetting,
) -> Result<PostgresAuthService, StartupError> {
    let signer_config = JwtSignerConfig::try_from(&setting.auth.jwt)?;
    let pg_pool = configure_postgresql(&setting.postgres).await?;

    Ok(AuthService::new(
        PostgresUserStore::new(pg_pool.clone()),
        PostgresRefreshTokenStore::new(pg_pool),
        Argon2PasswordHasher::default(),
        JwtTokenSigner::new(signer_config),
        configure_email_client(&setting.email_client)?,
        setting.auth.password_reset_url.clone(),
    ))
}
