use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    pub connection_timeout: u64,
    /// Categories preloaded into the memory backend, as (id, name)
    pub seed_categories: Vec<(i32, String)>,
    /// Users preloaded into the memory backend, as (id, username)
    pub seed_users: Vec<(i32, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_leeway_secs: u64,
    /// Claim carrying the numeric user id
    pub user_id_claim: String,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_BACKEND") {
            self.database.backend = match v.to_ascii_lowercase().as_str() {
                "memory" => StoreBackend::Memory,
                "postgres" | "postgresql" => StoreBackend::Postgres,
                _ => self.database.backend,
            };
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_SEED_CATEGORIES") {
            self.database.seed_categories = parse_seed_entries(&v);
        }
        if let Ok(v) = env::var("DATABASE_SEED_USERS") {
            self.database.seed_users = parse_seed_entries(&v);
        }

        // API overrides
        if let Ok(v) = env::var("API_HOST") {
            self.api.host = v;
        }
        if let Some(port) = env::var("API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_JWT_SECRET").or_else(|_| env::var("JWT_SECRET")) {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_ISSUER") {
            self.security.jwt_issuer = Some(v).filter(|s| !s.is_empty());
        }
        if let Ok(v) = env::var("SECURITY_JWT_LEEWAY_SECS") {
            self.security.jwt_leeway_secs = v.parse().unwrap_or(self.security.jwt_leeway_secs);
        }
        if let Ok(v) = env::var("SECURITY_USER_ID_CLAIM") {
            if !v.trim().is_empty() {
                self.security.user_id_claim = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    /// Checks that a server can actually start with this configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::Missing("SECURITY_JWT_SECRET"));
        }
        if self.database.backend == StoreBackend::Postgres && self.database.url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                seed_categories: Vec::new(),
                seed_users: Vec::new(),
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_issuer: None,
                jwt_leeway_secs: 60,
                user_id_claim: "sub".to_string(),
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                seed_categories: Vec::new(),
                seed_users: Vec::new(),
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_issuer: None,
                jwt_leeway_secs: 30,
                user_id_claim: "sub".to_string(),
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                seed_categories: Vec::new(),
                seed_users: Vec::new(),
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_issuer: None,
                jwt_leeway_secs: 0,
                user_id_claim: "sub".to_string(),
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

/// Parses `1:General,2:Rust` into (id, name) seeds. Malformed entries are skipped.
pub fn parse_seed_entries(raw: &str) -> Vec<(i32, String)> {
    raw.split(',')
        .filter_map(|entry| {
            let (id, name) = entry.trim().split_once(':')?;
            let id = id.trim().parse::<i32>().ok()?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((id, name.to_string()))
        })
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.security.user_id_claim, "sub");
        assert_eq!(config.database.backend, StoreBackend::Postgres);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.security.jwt_leeway_secs, 0);
        assert_eq!(config.api.max_request_size_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn validate_requires_secret_and_url() {
        let mut config = AppConfig::development();
        assert_eq!(config.validate(), Err(ConfigError::Missing("SECURITY_JWT_SECRET")));

        config.security.jwt_secret = "secret".to_string();
        assert_eq!(config.validate(), Err(ConfigError::Missing("DATABASE_URL")));

        config.database.backend = StoreBackend::Memory;
        assert!(config.validate().is_ok());

        config.database.backend = StoreBackend::Postgres;
        config.database.url = Some("postgres://localhost/blog".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_seed_entries_and_skips_garbage() {
        let seeds = parse_seed_entries("1:General, 2 : Rust ,x:Bad,3:,4");
        assert_eq!(seeds, vec![(1, "General".to_string()), (2, "Rust".to_string())]);
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let mut config = AppConfig::development();
        config.api.host = "127.0.0.1".to_string();
        config.api.port = 8088;
        assert_eq!(config.bind_addr(), "127.0.0.1:8088");
    }
}
