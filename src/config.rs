use std::env;

use crate::error::AppError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    /// HMAC key for signing identity tokens.
    pub jwt_secret: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Returns `AppError::Configuration` if `JWT_SECRET` is missing or empty, or if a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, with the variable source supplied by the caller.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("JWT_SECRET must be set".into()))?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let server_port = match lookup("SERVER_PORT") {
            Some(port) => port.parse().map_err(|_| {
                AppError::Configuration(format!("SERVER_PORT must be a number, got {:?}", port))
            })?,
            None => DEFAULT_PORT,
        };

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(max) => max.parse().map_err(|_| {
                AppError::Configuration(format!(
                    "DATABASE_MAX_CONNECTIONS must be a number, got {:?}",
                    max
                ))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            server_port,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            jwt_secret,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.database_url, None);
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.server_url(), "http://127.0.0.1:3001");
    }

    #[test]
    fn test_config_custom_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://test"),
            ("SERVER_PORT", "3000"),
            ("SERVER_HOST", "0.0.0.0"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
        ]))
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://test"));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.database_max_connections, 20);
    }

    #[test]
    fn test_missing_secret_is_a_configuration_error() {
        let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://test")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));

        let result = Config::from_lookup(lookup_from(&[("JWT_SECRET", "   ")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_bad_port_is_a_configuration_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("SERVER_PORT", "eighty"),
        ]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
