//! Client configuration.
//!
//! Resolves the backend base URL and the public app origin used to build share
//! links. Explicit values win over environment variables, which win over the
//! local development defaults.

use url::Url;

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

pub const API_URL_ENV: &str = "LINKVAULT_API_URL";
pub const APP_ORIGIN_ENV: &str = "LINKVAULT_APP_ORIGIN";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST base URL without a trailing slash, e.g. `http://localhost:8000/api`.
    pub api_base_url: String,
    /// Origin of the web app, used to resolve relative share links.
    pub app_origin: Url,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            app_origin: Url::parse(DEFAULT_APP_ORIGIN)
                .unwrap_or_else(|_| unreachable!("default app origin is a valid URL")),
        }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: &str, app_origin: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url, "API base URL")?,
            app_origin: parse_origin(app_origin)?,
        })
    }

    /// Resolve configuration from explicit values, then the environment.
    pub fn resolve(api_base_url: Option<String>, app_origin: Option<String>) -> Result<Self> {
        let api_base_url = normalize_text_option(api_base_url)
            .or_else(|| normalize_text_option(std::env::var(API_URL_ENV).ok()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let app_origin = normalize_text_option(app_origin)
            .or_else(|| normalize_text_option(std::env::var(APP_ORIGIN_ENV).ok()))
            .unwrap_or_else(|| DEFAULT_APP_ORIGIN.to_string());

        Self::new(&api_base_url, &app_origin)
    }

    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None)
    }

    /// Full URL for a resource path such as `/links`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

/// Trim, require an http(s) scheme and drop trailing slashes.
pub fn normalize_base_url(raw: &str, label: &str) -> Result<String> {
    let value = normalize_text_option(Some(raw.to_string()))
        .ok_or_else(|| Error::Config(format!("{label} must not be empty")))?;
    if !is_http_url(&value) {
        return Err(Error::Config(format!(
            "{label} must include http:// or https://"
        )));
    }
    Url::parse(&value).map_err(|error| Error::Config(format!("Invalid {label}: {error}")))?;
    Ok(value.trim_end_matches('/').to_string())
}

fn parse_origin(raw: &str) -> Result<Url> {
    let value = normalize_base_url(raw, "app origin")?;
    Url::parse(&value).map_err(|error| Error::Config(format!("Invalid app origin: {error}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url("  ", "API base URL").is_err());
        assert!(normalize_base_url("localhost:8000/api", "API base URL").is_err());
    }

    #[test]
    fn normalize_base_url_trims_trailing_slash() {
        assert_eq!(
            normalize_base_url(" https://api.example.com/api/ ", "API base URL").unwrap(),
            "https://api.example.com/api"
        );
    }

    #[test]
    fn explicit_values_win() {
        let config = ClientConfig::resolve(
            Some("https://vault.example.com/api".to_string()),
            Some("https://vault.example.com".to_string()),
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://vault.example.com/api");
        assert_eq!(config.app_origin.as_str(), "https://vault.example.com/");
    }

    #[test]
    fn default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.endpoint("/links"), "http://localhost:8000/api/links");
    }
}
