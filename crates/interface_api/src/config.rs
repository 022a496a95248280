//! API configuration

use std::time::Duration;

use serde::Deserialize;

use core_kernel::Pagination;
use domain_identity::policy::DEFAULT_VERIFIED_EMAIL_SUFFIX;
use infra_db::DatabaseConfig;

/// API configuration
///
/// Every field has a development default, so any subset may be supplied.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Maximum pool size
    pub db_max_connections: u32,
    /// Connections kept open while idle
    pub db_min_connections: u32,
    /// Seconds to wait when acquiring a connection
    pub db_connect_timeout_secs: u64,
    /// Seconds before a connection is recycled
    pub db_max_lifetime_secs: u64,
    /// Seconds an idle connection is kept
    pub db_idle_timeout_secs: u64,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Email suffix that marks an account verified at registration
    pub verified_email_suffix: String,
    /// Upper bound for the `limit` listing parameter
    pub max_page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 30 * 24 * 3600,
            database_url: "postgres://localhost/campusfind".to_string(),
            db_max_connections: 10,
            db_min_connections: 2,
            db_connect_timeout_secs: 30,
            db_max_lifetime_secs: 30 * 60,
            db_idle_timeout_secs: 10 * 60,
            log_level: "info".to_string(),
            log_json: false,
            verified_email_suffix: DEFAULT_VERIFIED_EMAIL_SUFFIX.to_string(),
            max_page_size: Pagination::MAX_LIMIT,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// A bare `DATABASE_URL` is used when `API_DATABASE_URL` is absent.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_default("database_url", url)?;
        }

        builder
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Pool settings for [`infra_db::create_pool`]
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
            .max_connections(self.db_max_connections)
            .min_connections(self.db_min_connections)
            .connect_timeout(Duration::from_secs(self.db_connect_timeout_secs))
            .max_lifetime(Duration::from_secs(self.db_max_lifetime_secs))
            .idle_timeout(Duration::from_secs(self.db_idle_timeout_secs))
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.verified_email_suffix, ".on.ca");
        assert_eq!(config.max_page_size, 100);
        assert!(!config.log_json);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: ApiConfig = config::Config::builder()
            .set_override("port", 9090)
            .unwrap()
            .set_override("log_json", true)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9090);
        assert!(config.log_json);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.jwt_expiration_secs, 30 * 24 * 3600);
    }

    #[test]
    fn test_database_config_follows_pool_settings() {
        let config: ApiConfig = config::Config::builder()
            .set_override("database_url", "postgres://db/campusfind")
            .unwrap()
            .set_override("db_min_connections", 4)
            .unwrap()
            .set_override("db_idle_timeout_secs", 90)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let pool = config.database_config();
        assert_eq!(pool.url, "postgres://db/campusfind");
        assert_eq!(pool.max_connections, 10);
        assert_eq!(pool.min_connections, 4);
        assert_eq!(pool.connect_timeout, Duration::from_secs(30));
        assert_eq!(pool.max_lifetime, Duration::from_secs(1800));
        assert_eq!(pool.idle_timeout, Duration::from_secs(90));
    }
}
