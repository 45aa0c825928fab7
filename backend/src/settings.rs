//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ADMISSIONS_*` environment variables and an
//! optional configuration file. Every field is optional; the accessors apply
//! defaults and reject values the service cannot run with.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::RetryPolicy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_POOL_SIZE: u32 = 10;
const DEFAULT_PERSISTENCE_CONCURRENCY: usize = 16;
const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br";
const DEFAULT_VIACEP_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_INITIAL_BACKOFF_MS: u64 = 200;
const DEFAULT_RETRY_MAX_BACKOFF_MS: u64 = 2_000;

/// Name of the retry policy guarding ViaCEP calls.
pub const VIACEP_RETRY_POLICY: &str = "viacep";

/// Settings the service cannot start with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("bind_addr '{value}' is not a socket address: {message}")]
    BindAddr { value: String, message: String },
    #[error("viacep_base_url '{value}' is not a valid URL: {message}")]
    BaseUrl { value: String, message: String },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error(
        "viacep_retry_max_backoff_ms ({max} ms) is below viacep_retry_initial_backoff_ms ({initial} ms)"
    )]
    BackoffOrder { initial: u64, max: u64 },
}

/// Runtime configuration for the admissions service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADMISSIONS")]
pub struct AdmissionsSettings {
    /// Socket address the HTTP server binds.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled PostgreSQL connections.
    pub database_pool_size: Option<u32>,
    /// Maximum concurrent blocking store calls.
    pub persistence_concurrency: Option<usize>,
    /// Base URL of the postal lookup service.
    pub viacep_base_url: Option<String>,
    /// Per-attempt lookup deadline in milliseconds.
    pub viacep_timeout_ms: Option<u64>,
    /// Lookup attempts including the first.
    pub viacep_retry_max_attempts: Option<u32>,
    /// First backoff delay in milliseconds.
    pub viacep_retry_initial_backoff_ms: Option<u64>,
    /// Backoff cap in milliseconds.
    pub viacep_retry_max_backoff_ms: Option<u64>,
}

fn positive<T: Default + PartialEq>(value: T, field: &'static str) -> Result<T, SettingsError> {
    if value == T::default() {
        Err(SettingsError::Zero { field })
    } else {
        Ok(value)
    }
}

impl AdmissionsSettings {
    /// Socket address to bind, `0.0.0.0:8080` by default.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn database_pool_size(&self) -> Result<u32, SettingsError> {
        positive(
            self.database_pool_size.unwrap_or(DEFAULT_DATABASE_POOL_SIZE),
            "database_pool_size",
        )
    }

    pub fn persistence_concurrency(&self) -> Result<usize, SettingsError> {
        positive(
            self.persistence_concurrency
                .unwrap_or(DEFAULT_PERSISTENCE_CONCURRENCY),
            "persistence_concurrency",
        )
    }

    /// Base URL of the postal lookup service, `https://viacep.com.br` by
    /// default.
    pub fn viacep_base_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .viacep_base_url
            .as_deref()
            .unwrap_or(DEFAULT_VIACEP_BASE_URL);
        Url::parse(value).map_err(|err| SettingsError::BaseUrl {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn viacep_timeout(&self) -> Result<Duration, SettingsError> {
        positive(
            self.viacep_timeout_ms.unwrap_or(DEFAULT_VIACEP_TIMEOUT_MS),
            "viacep_timeout_ms",
        )
        .map(Duration::from_millis)
    }

    /// The named `viacep` retry policy.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use admissions::settings::AdmissionsSettings;
    ///
    /// let settings = AdmissionsSettings {
    ///     viacep_retry_max_attempts: Some(5),
    ///     ..AdmissionsSettings::default()
    /// };
    /// let policy = settings.viacep_retry_policy().expect("valid policy");
    /// assert_eq!(policy.name, "viacep");
    /// assert_eq!(policy.max_attempts, 5);
    /// assert_eq!(policy.initial_backoff, Duration::from_millis(200));
    /// ```
    pub fn viacep_retry_policy(&self) -> Result<RetryPolicy, SettingsError> {
        let max_attempts = positive(
            self.viacep_retry_max_attempts
                .unwrap_or(DEFAULT_RETRY_MAX_ATTEMPTS),
            "viacep_retry_max_attempts",
        )?;
        let initial = self
            .viacep_retry_initial_backoff_ms
            .unwrap_or(DEFAULT_RETRY_INITIAL_BACKOFF_MS);
        let max = self
            .viacep_retry_max_backoff_ms
            .unwrap_or(DEFAULT_RETRY_MAX_BACKOFF_MS);
        if max < initial {
            return Err(SettingsError::BackoffOrder { initial, max });
        }
        Ok(RetryPolicy {
            name: VIACEP_RETRY_POLICY.to_owned(),
            max_attempts,
            initial_backoff: Duration::from_millis(initial),
            max_backoff: Duration::from_millis(max),
        })
    }
}
