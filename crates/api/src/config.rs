use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;

/// Local development origins allowed by default.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://127.0.0.1:5173",
    "http://localhost:5173",
    "http://localhost:8080",
];

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Signing secret reserved for authentication. Loaded but not used by
    /// any route yet.
    pub jwt_secret: String,
    /// SQLite database file (default: `data/app.db`).
    pub db_path: PathBuf,
    /// Deployment environment name (default: `dev`).
    pub environment: String,
    /// Allowed CORS origins.
    pub cors_origins: Vec<HeaderValue>,
    /// Per-request timeout in seconds (default: `15`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may run after a shutdown signal (default: `10`).
    pub shutdown_grace_secs: u64,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `APP_PORT`             | `8080` (`:8080` also accepted)   |
    /// | `JWT_SECRET`           | `devsecret`                      |
    /// | `DB_PATH`              | `data/app.db`                    |
    /// | `ENVIRONMENT`          | `dev`                            |
    /// | `CORS_ORIGINS`         | the local dev origins            |
    /// | `REQUEST_TIMEOUT_SECS` | `15`                             |
    /// | `SHUTDOWN_GRACE_SECS`  | `10`                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host_raw = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let host = host_raw.parse().map_err(|_| ConfigError::Invalid {
            var: "HOST",
            expected: "IP address",
            value: host_raw.clone(),
        })?;

        let port_raw = var("APP_PORT").unwrap_or_else(|| "8080".into());
        let port = port_raw
            .trim_start_matches(':')
            .parse()
            .map_err(|_| ConfigError::Invalid {
                var: "APP_PORT",
                expected: "port number",
                value: port_raw.clone(),
            })?;

        let cors_origins = match var("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|origin| {
                    HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                        var: "CORS_ORIGINS",
                        expected: "origin",
                        value: origin.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => DEFAULT_CORS_ORIGINS
                .iter()
                .copied()
                .map(HeaderValue::from_static)
                .collect(),
        };

        Ok(Self {
            host,
            port,
            jwt_secret: var("JWT_SECRET").unwrap_or_else(|| "devsecret".into()),
            db_path: var("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/app.db")),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "dev".into()),
            cors_origins,
            request_timeout_secs: parse_secs(&var, "REQUEST_TIMEOUT_SECS", 15)?,
            shutdown_grace_secs: parse_secs(&var, "SHUTDOWN_GRACE_SECS", 10)?,
        })
    }

    pub fn is_dev(&self) -> bool {
        self.environment == "dev"
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

fn parse_secs(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key,
            expected: "number of seconds",
            value: raw,
        }),
        None => Ok(default),
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("db_path", &self.db_path)
            .field("environment", &self.environment)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("shutdown_grace_secs", &self.shutdown_grace_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.jwt_secret, "devsecret");
        assert_eq!(config.db_path, PathBuf::from("data/app.db"));
        assert!(config.is_dev());
        assert_eq!(config.cors_origins.len(), DEFAULT_CORS_ORIGINS.len());
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.shutdown_grace(), Duration::from_secs(10));
    }

    #[test]
    fn port_accepts_leading_colon() {
        let config = load(&[("APP_PORT", ":9090")]).unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = load(&[("DB_PATH", ""), ("APP_PORT", "  ")]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("data/app.db"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("DB_PATH", "/var/lib/village/app.db"),
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://village.example, https://admin.village.example"),
            ("SHUTDOWN_GRACE_SECS", "3"),
        ])
        .unwrap();

        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.db_path, PathBuf::from("/var/lib/village/app.db"));
        assert!(!config.is_dev());
        assert_eq!(
            config.cors_origins,
            vec![
                HeaderValue::from_static("https://village.example"),
                HeaderValue::from_static("https://admin.village.example"),
            ]
        );
        assert_eq!(config.shutdown_grace_secs, 3);
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert_matches!(
            load(&[("APP_PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "APP_PORT", .. })
        );
    }

    #[test]
    fn invalid_host_is_an_error() {
        assert_matches!(
            load(&[("HOST", "not-an-ip")]),
            Err(ConfigError::Invalid { var: "HOST", .. })
        );
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = load(&[("JWT_SECRET", "hunter2")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
