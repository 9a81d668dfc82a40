//! Application configuration loaded from environment variables.

use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use yatube_core::pagination::DEFAULT_PAGE_SIZE;
use yatube_infra::auth::JwtConfig;
use yatube_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` keeps everything in memory.
    pub database: Option<DatabaseConfig>,
    pub posts_per_page: NonZeroUsize,
    /// JSON file of users and groups to load at startup.
    pub fixtures_path: Option<PathBuf>,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            posts_per_page: parse_var("POSTS_PER_PAGE").unwrap_or(DEFAULT_PAGE_SIZE),
            fixtures_path: env::var_os("FIXTURES_PATH").map(PathBuf::from),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Parse `name`, treating a missing or unparsable value as unset.
fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Ignoring unparsable environment variable");
            None
        }
    }
}
