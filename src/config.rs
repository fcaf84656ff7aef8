/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、HTTP 制限など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - DATABASE_URL の scheme から storage backend を決める
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn from_url(url: &str) -> Option<Self> {
        let (scheme, _) = url.split_once("://")?;
        match scheme.to_ascii_lowercase().as_str() {
            "mongodb" | "mongodb+srv" => Some(Self::Mongo),
            "postgres" | "postgresql" => Some(Self::Postgres),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database_url: String,
    pub database_name: String,
    pub storage: StorageBackend,

    pub cors_allowed_origins: Vec<String>,

    pub request_timeout: Duration,
    pub request_body_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // `lookup` returns the raw value of a variable, `None` if unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match lookup("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = lookup("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let storage =
            StorageBackend::from_url(&database_url).ok_or(ConfigError::Invalid("DATABASE_URL"))?;

        let database_name = lookup("DATABASE_NAME").unwrap_or_else(|| "blog".to_string());

        let cors_allowed_origins =
            parse_origins(&lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        // 0 would time out (or reject) every request
        let request_timeout = match lookup("REQUEST_TIMEOUT_SECONDS") {
            Some(s) => match s.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS")),
            },
            None => Duration::from_secs(30),
        };

        let request_body_limit = match lookup("REQUEST_BODY_LIMIT_BYTES") {
            Some(s) => match s.trim().parse::<usize>() {
                Ok(bytes) if bytes > 0 => bytes,
                _ => return Err(ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES")),
            },
            None => 1024 * 1024,
        };

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_name,
            storage,
            cors_allowed_origins,
            request_timeout,
            request_body_limit,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
impl Config {
    // In-memory config for router tests.
    pub fn for_tests() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            app_env: AppEnv::Development,
            database_url: "memory://".to_string(),
            database_name: "blog".to_string(),
            storage: StorageBackend::Memory,
            cors_allowed_origins: Vec::new(),
            request_timeout: Duration::from_secs(5),
            request_body_limit: 64 * 1024,
        }
    }
}
