use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat, builder::DefaultState};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{defaults, env};
use crate::tokens::JwtSignerConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceSetting {
    pub auth: AuthSetting,
    pub postgres: PostgresSetting,
    pub email_client: EmailClientSetting,
    pub maintenance: MaintenanceSetting,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSetting {
    pub jwt: JwtSetting,
    /// Page the reset link points at; the token is appended as `?token=`.
    pub password_reset_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSetting {
    pub access_secret: Secret<String>,
    pub refresh_secret: Secret<String>,
    pub issuer: String,
    pub access_time_to_live_in_seconds: i64,
    pub refresh_time_to_live_in_seconds: i64,
    pub reset_time_to_live_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSetting {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSetting {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSetting {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceSetting {
    pub sweep_interval_in_seconds: u64,
}

impl MaintenanceSetting {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_in_seconds)
    }
}

impl AuthServiceSetting {
    /// Defaults, then an optional `config/auth.*` file, then `PFM_*`
    /// environment variables (`PFM_AUTH__JWT__ACCESS_SECRET`, ...). A `.env`
    /// file is loaded first when present. Secrets have no default.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        with_defaults()?
            .add_source(File::with_name(defaults::CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(env::PREFIX)
                    .prefix_separator("_")
                    .separator(env::SEPARATOR),
            )
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Defaults overlaid with a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        with_defaults()?
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        JwtSignerConfig::try_from(&self.auth.jwt)?;

        if self.maintenance.sweep_interval_in_seconds == 0 {
            return Err(ConfigError::Message(
                "maintenance.sweep_interval_in_seconds must be greater than zero".to_owned(),
            ));
        }

        Ok(self)
    }
}

fn with_defaults() -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("auth.jwt.issuer", defaults::ISSUER)?
        .set_default(
            "auth.jwt.access_time_to_live_in_seconds",
            defaults::ACCESS_TIME_TO_LIVE_IN_SECONDS,
        )?
        .set_default(
            "auth.jwt.refresh_time_to_live_in_seconds",
            defaults::REFRESH_TIME_TO_LIVE_IN_SECONDS,
        )?
        .set_default(
            "auth.jwt.reset_time_to_live_in_seconds",
            defaults::RESET_TIME_TO_LIVE_IN_SECONDS,
        )?
        .set_default("auth.password_reset_url", defaults::PASSWORD_RESET_URL)?
        .set_default("postgres.max_connections", defaults::POSTGRES_MAX_CONNECTIONS)?
        .set_default("email_client.base_url", defaults::email_client::BASE_URL)?
        .set_default("email_client.sender", defaults::email_client::SENDER)?
        .set_default(
            "email_client.timeout_in_millis",
            defaults::email_client::TIMEOUT_IN_MILLIS,
        )?
        .set_default(
            "maintenance.sweep_interval_in_seconds",
            defaults::SWEEP_INTERVAL_IN_SECONDS,
        )
}

impl TryFrom<&JwtSetting> for JwtSignerConfig {
    type Error = ConfigError;

    fn try_from(setting: &JwtSetting) -> Result<Self, Self::Error> {
        Ok(Self {
            access_secret: setting.access_secret.clone(),
            refresh_secret: setting.refresh_secret.clone(),
            issuer: setting.issuer.clone(),
            access_time_to_live: time_to_live(
                "auth.jwt.access_time_to_live_in_seconds",
                setting.access_time_to_live_in_seconds,
            )?,
            refresh_time_to_live: time_to_live(
                "auth.jwt.refresh_time_to_live_in_seconds",
                setting.refresh_time_to_live_in_seconds,
            )?,
            reset_time_to_live: time_to_live(
                "auth.jwt.reset_time_to_live_in_seconds",
                setting.reset_time_to_live_in_seconds,
            )?,
        })
    }
}

fn time_to_live(key: &str, seconds: i64) -> Result<chrono::Duration, ConfigError> {
    if !(1..=defaults::MAX_TIME_TO_LIVE_IN_SECONDS).contains(&seconds) {
        return Err(ConfigError::Message(format!(
            "{key} must be between 1 and {} seconds, got {seconds}",
            defaults::MAX_TIME_TO_LIVE_IN_SECONDS
        )));
    }
    chrono::Duration::try_seconds(seconds)
        .ok_or_else(|| ConfigError::Message(format!("{key} is out of range")))
}
