//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into services. Request handling never reads environment variables. The
//! `*_from_env_value` helpers take the raw optional value so they can be tested without
//! mutating the process environment.

use crate::catalog::SymptomCatalog;
use crate::constants::{
    DEFAULT_PREDICTOR_TIMEOUT_SECS, DEFAULT_PREDICTOR_URL, DEFAULT_REST_ADDR,
    MAX_PREDICTOR_TIMEOUT_SECS,
};
use crate::{TriageError, TriageResult};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct TriageConfig {
    rest_addr: SocketAddr,
    predictor_url: String,
    predictor_timeout: Duration,
    catalog_file: Option<PathBuf>,
    api_key: Option<String>,
}

impl TriageConfig {
    /// Create a new `TriageConfig`.
    pub fn new(
        rest_addr: SocketAddr,
        predictor_url: String,
        predictor_timeout: Duration,
        catalog_file: Option<PathBuf>,
        api_key: Option<String>,
    ) -> TriageResult<Self> {
        let predictor_url = predictor_url.trim().trim_end_matches('/').to_string();
        if !(predictor_url.starts_with("http://") || predictor_url.starts_with("https://")) {
            return Err(TriageError::InvalidInput(
                "predictor_url must start with http:// or https://".into(),
            ));
        }

        if predictor_timeout.is_zero() {
            return Err(TriageError::InvalidInput(
                "predictor_timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            rest_addr,
            predictor_url,
            predictor_timeout,
            catalog_file,
            api_key,
        })
    }

    pub fn rest_addr(&self) -> SocketAddr {
        self.rest_addr
    }

    pub fn predictor_url(&self) -> &str {
        &self.predictor_url
    }

    pub fn predictor_timeout(&self) -> Duration {
        self.predictor_timeout
    }

    pub fn catalog_file(&self) -> Option<&Path> {
        self.catalog_file.as_deref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Loads the configured catalog file, or the built-in table when none is set.
    pub fn load_catalog(&self) -> TriageResult<SymptomCatalog> {
        match &self.catalog_file {
            Some(path) => SymptomCatalog::load(path),
            None => Ok(SymptomCatalog::builtin()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the REST bind address. `None` or blank gives [`DEFAULT_REST_ADDR`].
pub fn rest_addr_from_env_value(value: Option<String>) -> TriageResult<SocketAddr> {
    let raw = non_blank(value).unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());
    raw.parse()
        .map_err(|_| TriageError::InvalidInput(format!("invalid REST address '{raw}'")))
}

/// Parse the predictor base URL. `None` or blank gives [`DEFAULT_PREDICTOR_URL`].
pub fn predictor_url_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_PREDICTOR_URL.to_string())
}

/// Parse the predictor timeout in whole seconds, 1 to [`MAX_PREDICTOR_TIMEOUT_SECS`].
pub fn predictor_timeout_from_env_value(value: Option<String>) -> TriageResult<Duration> {
    let Some(raw) = non_blank(value) else {
        return Ok(Duration::from_secs(DEFAULT_PREDICTOR_TIMEOUT_SECS));
    };

    let secs: u64 = raw.parse().map_err(|_| {
        TriageError::InvalidInput(format!("predictor timeout must be whole seconds, got '{raw}'"))
    })?;

    if secs == 0 || secs > MAX_PREDICTOR_TIMEOUT_SECS {
        return Err(TriageError::InvalidInput(format!(
            "predictor timeout must be between 1 and {MAX_PREDICTOR_TIMEOUT_SECS} seconds"
        )));
    }

    Ok(Duration::from_secs(secs))
}

/// Parse an optional catalog path.
pub fn catalog_file_from_env_value(value: Option<String>) -> Option<PathBuf> {
    non_blank(value).map(PathBuf::from)
}

/// Parse an optional API key. Blank values disable the key check.
pub fn api_key_from_env_value(value: Option<String>) -> Option<String> {
    non_blank(value)
}
