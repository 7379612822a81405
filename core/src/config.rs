//! Client configuration.
//!
//! # Environment Variables
//! - `MARKETPLACE_API_BASE_URL` - API root (default: `http://localhost:3000/api/v1`)
//! - `MARKETPLACE_API_TOKEN` - sent as `Authorization: Bearer <token>` when set
//! - `MARKETPLACE_API_ERROR_TITLE` - title of failure notifications (default: `Erro da API`)

use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";
pub const DEFAULT_ERROR_TITLE: &str = "Erro da API";

const BASE_URL_VAR: &str = "MARKETPLACE_API_BASE_URL";
const TOKEN_VAR: &str = "MARKETPLACE_API_TOKEN";
const ERROR_TITLE_VAR: &str = "MARKETPLACE_API_ERROR_TITLE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid base URL {0}: {1}")]
    InvalidBaseUrl(String, String),
    #[error("Unsupported URL scheme {0}: expected http or https")]
    UnsupportedScheme(String),
}

/// Settings shared by every request an `ApiClient` sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without a trailing slash; request paths are appended to it.
    pub base_url: String,
    /// Extra headers sent with every request, layered over `Content-Type`.
    pub headers: Vec<(String, String)>,
    /// Title attached to failure notifications.
    pub error_title: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: Vec::new(),
            error_title: DEFAULT_ERROR_TITLE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Config for `base_url`, validated and with any trailing slash removed.
    ///
    /// # Errors
    ///
    /// Fails if `base_url` does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Build from `MARKETPLACE_API_*` environment variables, falling back to
    /// the defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Fails if `MARKETPLACE_API_BASE_URL` is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;
        if let Some(token) = lookup(TOKEN_VAR).filter(|t| !t.is_empty()) {
            config = config.with_bearer_token(&token);
        }
        if let Some(title) = lookup(ERROR_TITLE_VAR) {
            config.error_title = title;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {token}"))
    }

    #[must_use]
    pub fn with_error_title(mut self, title: impl Into<String>) -> Self {
        self.error_title = title.into();
        self
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let parsed =
        Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl(raw.to_string(), e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(raw.to_string()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
