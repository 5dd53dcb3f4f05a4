//! Configuration types for the GitHub transport

use serde::Deserialize;
use std::time::Duration;

/// Public GitHub API
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Environment variable consulted when no token is configured
pub const TOKEN_ENV: &str = "SKILLS_GITHUB_TOKEN";

/// Environment variable consulted when no base URL is configured
pub const BASE_URL_ENV: &str = "SKILLS_GITHUB_URL";

/// GitHub transport configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// Bearer token; anonymous requests when unset
    #[serde(default)]
    pub token: Option<String>,

    /// API base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GitHubConfig {
    /// Fill unset token and base URL from `SKILLS_GITHUB_TOKEN` / `SKILLS_GITHUB_URL`
    #[must_use]
    pub fn with_env_fallback(self) -> Self {
        self.with_fallback_from(|key| std::env::var(key).ok())
    }

    /// Fill unset token and base URL from `lookup`
    ///
    /// Empty values count as unset.
    #[must_use]
    pub fn with_fallback_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());
        if self.token.is_none() {
            self.token = lookup(TOKEN_ENV);
        }
        if self.base_url.is_none() {
            self.base_url = lookup(BASE_URL_ENV);
        }
        self
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    /// Request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GitHubConfig::default();
        assert_eq!(config.token, None);
        assert_eq!(config.resolved_base_url(), "https://api.github.com");
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = GitHubConfig {
            base_url: Some("https://ghe.example.com/api/v3/".into()),
            ..GitHubConfig::default()
        };
        assert_eq!(config.resolved_base_url(), "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_fallback_fills_unset_fields_only() {
        let lookup = |key: &str| match key {
            TOKEN_ENV => Some("env-token".to_string()),
            BASE_URL_ENV => Some("http://env.example".to_string()),
            _ => None,
        };

        let config = GitHubConfig {
            token: Some("configured".into()),
            ..GitHubConfig::default()
        }
        .with_fallback_from(lookup);

        assert_eq!(config.token.as_deref(), Some("configured"));
        assert_eq!(config.base_url.as_deref(), Some("http://env.example"));
    }

    #[test]
    fn test_empty_env_value_is_unset() {
        let config = GitHubConfig::default().with_fallback_from(|_| Some(String::new()));
        assert_eq!(config.token, None);
        assert_eq!(config.base_url, None);
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            token = "ghp_example"
            base_url = "https://ghe.example.com/api/v3"
        "#;

        let config: GitHubConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

        assert_eq!(config.token.as_deref(), Some("ghp_example"));
        assert_eq!(config.timeout_secs, 60);
    }
}
