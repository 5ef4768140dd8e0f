//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `AEROCTL_CONFIG`
//! environment variable. A missing file is not an error: every field has a default.
//!
//! ## Loading Priority
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `AEROCTL_` override YAML values
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `AEROCTL_FIXTURES__SEED=42` sets the `fixtures.seed` field.
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use aeroctl::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let args = Args::parse();
//! let config = Config::load(&args)?;
//!
//! println!("Server will bind to {}", config.bind_address());
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Structure
//!
//! - **Server**: `host`, `port`
//! - **Fixtures**: `fixtures.realname_count`, `fixtures.seed`, `fixtures.recent_window`,
//!   `fixtures.image_base_url` - shape of the generated realname records
//! - **Pagination**: `pagination.default_page_size`
//! - **CORS**: `cors.allowed_origins`, `cors.allow_credentials`, `cors.max_age`
//! - **Features**: `enable_metrics`, `enable_otel_export`
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! AEROCTL_PORT=8080
//! AEROCTL_FIXTURES__REALNAME_COUNT=50
//! AEROCTL_FIXTURES__RECENT_WINDOW=7d
//! AEROCTL_ENABLE_METRICS=false
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::api::models::pagination::DEFAULT_PAGE_SIZE;
use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "AEROCTL_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Expose Prometheus metrics on `/internal/metrics`
    pub enable_metrics: bool,
    /// Export traces over OTLP, configured through the standard `OTEL_*` variables
    pub enable_otel_export: bool,
    pub fixtures: FixturesConfig,
    pub pagination: PaginationConfig,
    pub cors: CorsConfig,
}

/// Generated realname verification fixtures.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixturesConfig {
    /// Number of realname records generated at startup (default: 20)
    pub realname_count: usize,
    /// Seed for the fixture generator. Unset means a fresh random seed per process.
    pub seed: Option<u64>,
    /// How far back creation timestamps may lie (default: 30 days)
    #[serde(with = "humantime_serde")]
    pub recent_window: Duration,
    /// Base URL of the placeholder images; a `random` query parameter is appended
    pub image_base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    /// Page size used when a list request doesn't carry a usable one (default: 10)
    pub default_page_size: i64,
}

/// CORS configuration for the console frontend.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests
    pub allowed_origins: Vec<CorsOrigin>,
    /// Allow credentials (cookies) in CORS requests
    pub allow_credentials: bool,
    /// Cache preflight requests for this many seconds
    pub max_age: Option<u64>,
}

/// CORS origin configuration.
///
/// Can be either a wildcard (`*`) to allow all origins, or a specific URL.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    /// Allow all origins (`*`)
    #[serde(deserialize_with = "parse_wildcard")]
    Wildcard,
    /// Specific origin URL (e.g., `http://localhost:8848`)
    #[serde(deserialize_with = "parse_url")]
    Url(Url),
}

fn parse_wildcard<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == "*" {
        Ok(())
    } else {
        Err(serde::de::Error::custom("Expected '*'"))
    }
}

fn parse_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Url::parse(&s).map_err(serde::de::Error::custom)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            enable_metrics: true,
            enable_otel_export: false,
            fixtures: FixturesConfig::default(),
            pagination: PaginationConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            realname_count: 20,
            seed: None,
            recent_window: Duration::from_secs(30 * 24 * 60 * 60),
            image_base_url: "https://picsum.photos/400/300".to_string(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![CorsOrigin::Wildcard],
            allow_credentials: false,
            max_age: Some(3600),
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<(), Error> {
        if self.pagination.default_page_size < 1 {
            return Err(Error::Internal {
                operation: format!(
                    "Config validation: pagination.default_page_size must be at least 1, got {}",
                    self.pagination.default_page_size
                ),
            });
        }

        if self.fixtures.recent_window.is_zero() {
            return Err(Error::Internal {
                operation: "Config validation: fixtures.recent_window must be longer than zero".to_string(),
            });
        }

        if self.cors.allow_credentials && self.cors.allowed_origins.contains(&CorsOrigin::Wildcard) {
            return Err(Error::Internal {
                operation: "Config validation: cors.allow_credentials cannot be combined with a '*' origin".to_string(),
            });
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("AEROCTL_").split("__"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
