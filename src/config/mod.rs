use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::translator::Locale;
use crate::types::InstanceMode;
use crate::unflatten::UnflattenMode;

pub const DEFAULT_ENV_FILE: &str = "app.env";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("Unsupported database connection '{0}', only mysql is supported")]
    UnsupportedDriver(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub unflatten: UnflattenConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub locale: Locale,
    pub default_instance_mode: InstanceMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub connection: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub pool_idle: u32,
    pub pool_max: u32,
    /// Seconds a pooled connection may live before it is recycled.
    pub pool_lifetime: u64,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout: u64,
    /// Applied per session so aggregated rosters are not cut short.
    pub group_concat_max_len: u64,
    pub enable_slow_query_warning: bool,
    pub slow_query_threshold_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_per_page: i64,
    pub max_per_page: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnflattenConfig {
    pub mode: UnflattenMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Empty or `*` allows any origin.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl AppConfig {
    /// Loads `app.env` (or the given file) into the process environment and
    /// builds the config from it. A missing file is not an error.
    pub fn load(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = env_file.unwrap_or_else(|| Path::new(DEFAULT_ENV_FILE));
        match dotenvy::from_path(path) {
            Ok(()) => tracing::debug!("Loaded env file {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(source) => {
                return Err(ConfigError::EnvFile { path: path.display().to_string(), source });
            }
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Picks the environment preset from `APP_ENV`, then applies per-variable
    /// overrides read through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_name(lookup("APP_ENV").as_deref());
        let preset = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };
        preset.with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        // App
        if let Some(v) = get("APP_NAME") {
            self.app.name = v;
        }
        if let Some(v) = get("APP_HOST") {
            self.app.host = v;
        }
        if let Some(v) = get("APP_PORT") {
            self.app.port = v.parse().unwrap_or(self.app.port);
        }
        if let Some(v) = get("APP_LOCALE") {
            self.app.locale = v
                .parse()
                .map_err(|message| ConfigError::InvalidValue { key: "APP_LOCALE", message })?;
        }
        if let Some(v) = get("DEFAULT_INSTANCE_MODE") {
            self.app.default_instance_mode = v
                .parse()
                .map_err(|message| ConfigError::InvalidValue { key: "DEFAULT_INSTANCE_MODE", message })?;
        }

        // Database
        if let Some(v) = get("DB_CONNECTION") {
            if !v.eq_ignore_ascii_case("mysql") {
                return Err(ConfigError::UnsupportedDriver(v));
            }
            self.database.connection = v.to_ascii_lowercase();
        }
        if let Some(v) = get("DB_HOST") {
            self.database.host = v;
        }
        if let Some(v) = get("DB_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Some(v) = get("DB_DATABASE") {
            self.database.database = v;
        }
        if let Some(v) = get("DB_USERNAME") {
            self.database.username = v;
        }
        if let Some(v) = lookup("DB_PASSWORD") {
            self.database.password = v;
        }
        if let Some(v) = get("DB_POOL_IDLE") {
            self.database.pool_idle = v.parse().unwrap_or(self.database.pool_idle);
        }
        if let Some(v) = get("DB_POOL_MAX") {
            self.database.pool_max = v.parse().unwrap_or(self.database.pool_max);
        }
        if let Some(v) = get("DB_POOL_LIFETIME") {
            self.database.pool_lifetime = v.parse().unwrap_or(self.database.pool_lifetime);
        }
        if let Some(v) = get("DB_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Some(v) = get("DB_GROUP_CONCAT_MAX_LEN") {
            self.database.group_concat_max_len = v.parse().unwrap_or(self.database.group_concat_max_len);
        }
        if let Some(v) = get("DB_ENABLE_SLOW_QUERY_WARNING") {
            self.database.enable_slow_query_warning = v.parse().unwrap_or(self.database.enable_slow_query_warning);
        }
        if let Some(v) = get("DB_SLOW_QUERY_THRESHOLD_MS") {
            self.database.slow_query_threshold_ms = v.parse().unwrap_or(self.database.slow_query_threshold_ms);
        }

        // Pagination
        if let Some(v) = get("PAGINATION_DEFAULT_PER_PAGE") {
            self.pagination.default_per_page = v
                .parse::<i64>()
                .ok()
                .filter(|n| *n > 0)
                .unwrap_or(self.pagination.default_per_page);
        }
        if let Some(v) = get("PAGINATION_MAX_PER_PAGE") {
            self.pagination.max_per_page = v.parse::<i64>().ok().filter(|n| *n > 0);
        }

        // Unflatten
        if let Some(v) = get("UNFLATTEN_MODE") {
            self.unflatten.mode = v
                .parse()
                .map_err(|message| ConfigError::InvalidValue { key: "UNFLATTEN_MODE", message })?;
        }

        // Security
        if let Some(v) = get("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Logging
        if let Some(v) = get("LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = get("LOG_JSON") {
            self.logging.json = v.parse().unwrap_or(self.logging.json);
        }

        Ok(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    fn base(environment: Environment) -> Self {
        Self {
            environment,
            app: AppSettings {
                name: "academic-connector".to_string(),
                host: "0.0.0.0".to_string(),
                port: 8080,
                locale: Locale::En,
                default_instance_mode: InstanceMode::Misca,
            },
            database: DatabaseConfig {
                connection: "mysql".to_string(),
                host: "127.0.0.1".to_string(),
                port: 3306,
                database: "misca".to_string(),
                username: "root".to_string(),
                password: String::new(),
                pool_idle: 2,
                pool_max: 10,
                pool_lifetime: 30 * 60,
                connection_timeout: 30,
                group_concat_max_len: 1024 * 1024,
                enable_slow_query_warning: true,
                slow_query_threshold_ms: 100,
            },
            pagination: PaginationConfig {
                default_per_page: crate::filter::DEFAULT_PER_PAGE,
                max_per_page: Some(1000),
            },
            unflatten: UnflattenConfig { mode: UnflattenMode::Tolerant },
            security: SecurityConfig { cors_origins: vec![] },
            logging: LoggingConfig { level: "debug".to_string(), json: false },
        }
    }

    fn development() -> Self {
        Self::base(Environment::Development)
    }

    fn staging() -> Self {
        let mut config = Self::base(Environment::Staging);
        config.database.pool_idle = 5;
        config.database.pool_max = 20;
        config.database.connection_timeout = 10;
        config.database.slow_query_threshold_ms = 500;
        config.pagination.max_per_page = Some(500);
        config.logging.level = "info".to_string();
        config
    }

    fn production() -> Self {
        let mut config = Self::base(Environment::Production);
        config.database.pool_idle = 10;
        config.database.pool_max = 50;
        config.database.connection_timeout = 5;
        config.database.slow_query_threshold_ms = 1000;
        config.pagination.max_per_page = Some(500);
        config.logging.level = "info".to_string();
        config.logging.json = true;
        config
    }
}
