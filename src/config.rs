use std::env;

use crate::error::{GenError, Result};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_ENV).ok();
        let base_url = env::var(BASE_URL_ENV).ok();

        GeminiConfig { api_key, base_url }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The credential, or `MissingCredential` when it is unset or blank.
    pub fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(GenError::MissingCredential(API_KEY_ENV)),
        }
    }

    pub fn base_url(&self) -> Result<String> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);

        if !raw.starts_with("http://") && !raw.starts_with("https://") {
            return Err(GenError::Config(format!(
                "{} must be an http(s) URL, got {:?}",
                BASE_URL_ENV, raw
            )));
        }

        Ok(raw.trim_end_matches('/').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_blank_key() {
        let config = GeminiConfig::new();
        assert!(matches!(
            config.api_key(),
            Err(GenError::MissingCredential(API_KEY_ENV))
        ));

        let config = GeminiConfig::new().with_api_key("   ");
        assert!(config.api_key().is_err());

        let config = GeminiConfig::new().with_api_key("secret");
        assert_eq!(config.api_key().unwrap(), "secret");
    }

    #[test]
    fn test_base_url() {
        assert_eq!(GeminiConfig::new().base_url().unwrap(), DEFAULT_BASE_URL);

        let config = GeminiConfig::new().with_base_url("http://127.0.0.1:8080/v1beta/");
        assert_eq!(config.base_url().unwrap(), "http://127.0.0.1:8080/v1beta");

        let config = GeminiConfig::new().with_base_url("ftp://example.com");
        assert!(matches!(config.base_url(), Err(GenError::Config(_))));
    }

    #[test]
    fn test_default_is_empty() {
        let config = GeminiConfig::default();
        assert!(config.api_key.is_none());
        assert!(config.base_url.is_none());
    }
}
