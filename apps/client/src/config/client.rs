use std::env;
use std::path::PathBuf;

use reqwest::Url;

use crate::error::ClientError;

pub const BASE_URL_VAR: &str = "EVENTS_API_BASE_URL";
pub const TOKEN_DIR_VAR: &str = "EVENTS_TOKEN_DIR";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Absolute http(s) base address, without a trailing slash
    pub base_url: String,
    /// Directory holding the token file; `None` keeps the token in memory
    pub token_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            token_dir: None,
        })
    }

    pub fn with_token_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.token_dir = Some(dir.into());
        self
    }

    /// Build from `EVENTS_API_BASE_URL` and `EVENTS_TOKEN_DIR`.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;
        config.token_dir = optional_var(TOKEN_DIR_VAR).map(PathBuf::from);
        Ok(config)
    }

    /// Full URL for a path relative to the base address.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_dir: None,
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed)
        .map_err(|e| ClientError::config(format!("invalid base URL '{trimmed}': {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ClientError::config(format!(
                "base URL must use http or https, got '{other}'"
            )))
        }
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ClientError::config(format!(
            "base URL must not carry a query or fragment: '{trimmed}'"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Get an environment variable, treating empty values as unset
fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
