//! Backend endpoint configuration.
//!
//! The base URL is resolved in priority order: the `--backend-url` flag,
//! the `VOXSCRIBE_BACKEND_URL` environment variable (a local `.env` is
//! honored by the CLI), then the saved settings file.

use anyhow::Result;

use crate::settings::Settings;

/// Environment variable holding the backend base URL
pub const BACKEND_URL_ENV_VAR: &str = "VOXSCRIBE_BACKEND_URL";

/// Validated base URL of the transcription backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
}

impl BackendConfig {
    /// Validate and normalize a backend base URL.
    pub fn new(url: &str) -> Result<Self> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            anyhow::bail!(
                "Backend URL not configured.\n\
                 Set with: voxscribe --backend-url http://localhost:5000\n\
                 Or set the {BACKEND_URL_ENV_VAR} environment variable."
            );
        }

        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            anyhow::bail!(
                "Invalid backend URL: must start with http:// or https://\n\
                 Got: {trimmed}\n\
                 Example: voxscribe --backend-url http://localhost:5000"
            );
        }

        // Ensure there's a host after the scheme
        let after_scheme = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .unwrap_or("");
        if after_scheme.is_empty() || after_scheme.starts_with('/') {
            anyhow::bail!(
                "Invalid backend URL: missing host\n\
                 Got: {trimmed}\n\
                 Example: voxscribe --backend-url http://localhost:5000"
            );
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve the backend URL from flag, environment, or saved settings.
    pub fn resolve(flag: Option<&str>, settings: &Settings) -> Result<Self> {
        if let Some(url) = flag {
            return Self::new(url);
        }
        if let Ok(url) = std::env::var(BACKEND_URL_ENV_VAR) {
            return Self::new(&url);
        }
        match &settings.backend_url {
            Some(url) => Self::new(url),
            None => Self::new(""),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a backend path (`path` must start with `/`).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(BackendConfig::new("http://localhost:5000").is_ok());
        assert!(BackendConfig::new("https://api.example.com").is_ok());
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert!(BackendConfig::new("localhost:5000").is_err());
        assert!(BackendConfig::new("ftp://example.com").is_err());
    }

    #[test]
    fn test_rejects_empty_and_hostless() {
        assert!(BackendConfig::new("").is_err());
        assert!(BackendConfig::new("http://").is_err());
        assert!(BackendConfig::new("http:///upload").is_err());
    }

    #[test]
    fn test_normalizes_trailing_slash() {
        let config = BackendConfig::new("http://localhost:5000/").unwrap();
        assert_eq!(config.endpoint("/signin"), "http://localhost:5000/signin");
    }

    #[test]
    fn test_resolve_prefers_flag_over_settings() {
        let settings = Settings {
            backend_url: Some("http://saved.example.com".to_string()),
            ..Settings::default()
        };
        let config =
            BackendConfig::resolve(Some("http://flag.example.com"), &settings).unwrap();
        assert_eq!(config.base_url(), "http://flag.example.com");
    }
}
