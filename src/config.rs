//! Configuration management for the shipping proxy
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! read first by `main`).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Default RajaOngkir (Komerce) API base URL
pub const DEFAULT_RAJAONGKIR_BASE_URL: &str = "https://rajaongkir.komerce.id/api/v1";

/// Runtime environment, controls how much error detail reaches clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    Test,
    Production,
    /// Unset or unrecognised (e.g. `staging`)
    #[default]
    Unspecified,
}

impl Environment {
    /// Whether unexpected error messages may be echoed back to the caller
    ///
    /// Only an explicit development environment does.
    pub fn exposes_error_details(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
            Environment::Unspecified => "unspecified",
        }
    }
}

impl From<&str> for Environment {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" => Environment::Test,
            "production" | "prod" => Environment::Production,
            _ => Environment::Unspecified,
        }
    }
}

/// Which proxy contract this process serves
///
/// Only one is mounted at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyMode {
    /// Per-route API under `/api/rajaongkir` with request validation
    Validated,
    /// Generic forwarder under `/proxy-rajaongkir`
    PassThrough,
}

impl FromStr for ProxyMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "validated" => Ok(ProxyMode::Validated),
            "passthrough" | "pass-through" => Ok(ProxyMode::PassThrough),
            other => bail!("Unknown proxy mode: {}", other),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// RajaOngkir API base URL (no trailing slash)
    pub rajaongkir_base_url: String,
    /// RajaOngkir API key; requests fail with a configuration error when unset
    pub rajaongkir_api_key: Option<String>,

    /// Allowed CORS origins; empty means any origin
    pub cors_allowed_origins: Vec<String>,

    pub environment: Environment,
    pub proxy_mode: ProxyMode,

    /// Upstream timeout for destination search
    pub destinations_timeout: Duration,
    /// Upstream timeout for cost calculation
    pub calculate_timeout: Duration,
    /// Upstream timeout for pass-through requests
    pub passthrough_timeout: Duration,

    /// Key protecting the docs endpoints (open when unset)
    pub docs_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            rajaongkir_base_url: DEFAULT_RAJAONGKIR_BASE_URL.to_string(),
            rajaongkir_api_key: None,
            cors_allowed_origins: Vec::new(),
            environment: Environment::Unspecified,
            proxy_mode: ProxyMode::Validated,
            destinations_timeout: Duration::from_millis(10_000),
            calculate_timeout: Duration::from_millis(15_000),
            passthrough_timeout: Duration::from_millis(15_000),
            docs_api_key: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        // Blank values behave like unset ones.
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("APP_ENV")
            .or_else(|| var("NODE_ENV"))
            .map(|value| Environment::from(value.as_str()))
            .unwrap_or(defaults.environment);

        let proxy_mode = match var("PROXY_MODE") {
            Some(value) => value.parse().context("Invalid PROXY_MODE")?,
            None => defaults.proxy_mode,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .unwrap_or_else(|| defaults.port.to_string())
                .parse()
                .context("Invalid PORT")?,

            rajaongkir_base_url: var("RAJA_ONGKIR_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.rajaongkir_base_url),
            rajaongkir_api_key: var("RAJA_ONGKIR_API_KEY"),

            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),

            environment,
            proxy_mode,

            destinations_timeout: parse_millis(
                var("DESTINATIONS_TIMEOUT_MS"),
                defaults.destinations_timeout,
            )
            .context("Invalid DESTINATIONS_TIMEOUT_MS")?,
            calculate_timeout: parse_millis(var("CALCULATE_TIMEOUT_MS"), defaults.calculate_timeout)
                .context("Invalid CALCULATE_TIMEOUT_MS")?,
            passthrough_timeout: parse_millis(
                var("PASSTHROUGH_TIMEOUT_MS"),
                defaults.passthrough_timeout,
            )
            .context("Invalid PASSTHROUGH_TIMEOUT_MS")?,

            docs_api_key: var("DOCS_API_KEY"),
        })
    }

    /// Whether the upstream API key is present
    pub fn has_api_key(&self) -> bool {
        self.rajaongkir_api_key.is_some()
    }
}

/// Split a comma separated origin list; `*` anywhere means any origin
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect();

    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}

fn parse_millis(value: Option<String>, default: Duration) -> Result<Duration> {
    match value {
        Some(ms) => Ok(Duration::from_millis(ms.trim().parse()?)),
        None => Ok(default),
    }
}
