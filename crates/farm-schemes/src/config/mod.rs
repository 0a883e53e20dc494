use crate::schemes::{CachePolicy, MalformedRowPolicy};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CATALOG_PATH: &str = "data/schemes/government_schemes.csv";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            catalog: CatalogConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the scheme catalog and how it is read.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub path: PathBuf,
    pub cache: CachePolicy,
    pub malformed_rows: MalformedRowPolicy,
}

impl CatalogConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: CachePolicy::Disabled,
            malformed_rows: MalformedRowPolicy::Skip,
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let path = env::var("SCHEME_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CATALOG_PATH));

        let cache_mode = env::var("SCHEME_CATALOG_CACHE").unwrap_or_else(|_| "disabled".to_string());
        let normalized = cache_mode.trim().to_ascii_lowercase();
        let cache = match normalized.as_str() {
            "" | "disabled" | "off" | "none" => CachePolicy::Disabled,
            "mtime" => CachePolicy::ModifiedTime,
            "ttl" => CachePolicy::TimeToLive(Duration::from_secs(cache_ttl_secs()?)),
            _ => return Err(ConfigError::InvalidCachePolicy(cache_mode)),
        };

        let malformed = env::var("SCHEME_MALFORMED_ROWS").unwrap_or_else(|_| "skip".to_string());
        let normalized = malformed.trim().to_ascii_lowercase();
        let malformed_rows = match normalized.as_str() {
            "skip" => MalformedRowPolicy::Skip,
            "fail" => MalformedRowPolicy::Fail,
            _ => return Err(ConfigError::InvalidMalformedRowPolicy(malformed)),
        };

        Ok(Self {
            path,
            cache,
            malformed_rows,
        })
    }
}

fn cache_ttl_secs() -> Result<u64, ConfigError> {
    let Ok(raw) = env::var("SCHEME_CATALOG_CACHE_TTL_SECS") else {
        return Ok(DEFAULT_CACHE_TTL_SECS);
    };

    let parsed = raw.trim().parse::<u64>();
    parsed.map_err(|_| ConfigError::InvalidCacheTtl(raw))
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCachePolicy(String),
    InvalidCacheTtl(String),
    InvalidMalformedRowPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCachePolicy(value) => write!(
                f,
                "SCHEME_CATALOG_CACHE must be one of disabled, mtime, ttl (got '{value}')"
            ),
            ConfigError::InvalidCacheTtl(value) => write!(
                f,
                "SCHEME_CATALOG_CACHE_TTL_SECS must be a whole number of seconds (got '{value}')"
            ),
            ConfigError::InvalidMalformedRowPolicy(value) => write!(
                f,
                "SCHEME_MALFORMED_ROWS must be 'skip' or 'fail' (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidCachePolicy(_)
            | ConfigError::InvalidCacheTtl(_)
            | ConfigError::InvalidMalformedRowPolicy(_) => None,
        }
    }
}
