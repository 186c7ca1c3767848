//! Client configuration (backend address, timeouts, gate policies).
//!
//! Defaults match the FinLedger backend's development setup; every value can
//! be overridden from the environment with `FINLEDGER_*` variables.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::guard::RoleDenial;

pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_ORIGIN: &str = "FINLEDGER_API_ORIGIN";
pub const ENV_TIMEOUT_SECS: &str = "FINLEDGER_API_TIMEOUT_SECS";
pub const ENV_SESSION_FILE: &str = "FINLEDGER_SESSION_FILE";
pub const ENV_FORBIDDEN_POLICY: &str = "FINLEDGER_FORBIDDEN_POLICY";
pub const ENV_ROLE_DENIAL: &str = "FINLEDGER_ROLE_DENIAL";

/// What a `403 Forbidden` response does to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForbiddenPolicy {
    /// Treat 403 exactly like 401: clear the session and force re-login.
    #[default]
    Logout,
    /// Keep the session and only propagate the error to the caller.
    Propagate,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API origin '{value}': {reason}")]
    InvalidOrigin { value: String, reason: String },

    #[error("invalid timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("invalid value '{value}' for {var} (expected one of: {expected})")]
    InvalidChoice {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend, without a path.
    pub origin: Url,
    /// Path prefix of the REST API on the origin.
    pub api_prefix: String,
    /// Fixed per-request timeout; there is no retry.
    pub timeout: Duration,
    /// Session file for durable storage; `None` uses the OS data directory.
    pub storage_path: Option<PathBuf>,
    pub forbidden_policy: ForbiddenPolicy,
    pub role_denial: RoleDenial,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: parse_origin(DEFAULT_ORIGIN).expect("default origin is valid"),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: DEFAULT_TIMEOUT,
            storage_path: None,
            forbidden_policy: ForbiddenPolicy::default(),
            role_denial: RoleDenial::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(origin: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            origin: parse_origin(origin)?,
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn with_forbidden_policy(mut self, policy: ForbiddenPolicy) -> Self {
        self.forbidden_policy = policy;
        self
    }

    pub fn with_role_denial(mut self, role_denial: RoleDenial) -> Self {
        self.role_denial = role_denial;
        self
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; unset or blank values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(origin) = get(ENV_ORIGIN) {
            config.origin = parse_origin(&origin)?;
        }

        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(path) = get(ENV_SESSION_FILE) {
            config.storage_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = get(ENV_FORBIDDEN_POLICY) {
            config.forbidden_policy = match raw.trim().to_ascii_lowercase().as_str() {
                "logout" => ForbiddenPolicy::Logout,
                "propagate" => ForbiddenPolicy::Propagate,
                _ => {
                    return Err(ConfigError::InvalidChoice {
                        var: ENV_FORBIDDEN_POLICY,
                        value: raw,
                        expected: "logout, propagate",
                    });
                }
            };
        }

        if let Some(raw) = get(ENV_ROLE_DENIAL) {
            config.role_denial = match raw.trim().to_ascii_lowercase().as_str() {
                "silent" => RoleDenial::Silent,
                "notify" => RoleDenial::Notify,
                _ => {
                    return Err(ConfigError::InvalidChoice {
                        var: ENV_ROLE_DENIAL,
                        value: raw,
                        expected: "silent, notify",
                    });
                }
            };
        }

        Ok(config)
    }

    /// Origin without a trailing slash, e.g. `http://localhost:8080`.
    pub fn origin_base(&self) -> String {
        self.origin.as_str().trim_end_matches('/').to_string()
    }

    /// Base of every REST endpoint, e.g. `http://localhost:8080/api`.
    pub fn api_base(&self) -> String {
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            self.origin_base()
        } else {
            format!("{}/{}", self.origin_base(), prefix)
        }
    }
}

fn parse_origin(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidOrigin {
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.path() != "/" || url.query().is_some() {
        return Err(invalid("origin must not carry a path or query".to_string()));
    }
    Ok(url)
}
