use crate::settings::error::SettingsError;
use model::execution::connection::{ConnectionSettings, SslMode};
use std::collections::HashMap;

pub const ENV_HOST: &str = "DATABASE_HOST";
pub const ENV_PORT: &str = "DATABASE_PORT";
pub const ENV_DATABASE: &str = "DATABASE_NAME";
pub const ENV_USER: &str = "DATABASE_USER";
pub const ENV_PASSWORD: &str = "DATABASE_PASSWORD";
pub const ENV_SSLMODE: &str = "DATABASE_SSLMODE";

/// Values given explicitly on the command line. They win over the environment.
#[derive(Debug, Default, Clone)]
pub struct ConnectionOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub ssl_mode: Option<String>,
}

/// Resolves connection settings with precedence override > env > default.
pub fn resolve_connection(
    env: &HashMap<String, String>,
    overrides: ConnectionOverrides,
) -> Result<ConnectionSettings, SettingsError> {
    let defaults = ConnectionSettings::default();
    let from_env = |key: &str| env.get(key).filter(|v| !v.trim().is_empty()).cloned();

    let port = match overrides.port {
        Some(port) => port,
        None => match from_env(ENV_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| SettingsError::InvalidPort {
                value: raw.clone(),
                source_name: ENV_PORT.to_string(),
            })?,
            None => defaults.port,
        },
    };

    let ssl_mode = match overrides.ssl_mode.or_else(|| from_env(ENV_SSLMODE)) {
        Some(raw) => raw
            .parse::<SslMode>()
            .map_err(|_| SettingsError::InvalidSslMode(raw))?,
        None => defaults.ssl_mode,
    };

    Ok(ConnectionSettings {
        host: overrides
            .host
            .or_else(|| from_env(ENV_HOST))
            .unwrap_or(defaults.host),
        port,
        database: overrides
            .database
            .or_else(|| from_env(ENV_DATABASE))
            .unwrap_or(defaults.database),
        user: overrides
            .user
            .or_else(|| from_env(ENV_USER))
            .unwrap_or(defaults.user),
        password: overrides
            .password
            .or_else(|| from_env(ENV_PASSWORD))
            .unwrap_or(defaults.password),
        ssl_mode,
        application_name: defaults.application_name,
    })
}
