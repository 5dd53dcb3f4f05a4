use serde::Deserialize;
use skillpull_github::GitHubConfig;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> String {
    dirs::home_dir().map_or_else(
        || "skills".to_string(),
        |home| {
            home.join(".skillpull")
                .join("skills")
                .to_string_lossy()
                .into_owned()
        },
    )
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the global config path: ~/.skillpull/skillpull.toml
    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".skillpull").join("skillpull.toml"))
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.skillpull/skillpull.toml (optional)
    /// 2. Local override: ./skillpull.toml (optional)
    /// 3. Environment variables with SKILLPULL__ prefix
    /// 4. SKILLS_GITHUB_TOKEN / SKILLS_GITHUB_URL (highest priority)
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let mut config_builder = config::Config::builder();

        // Layer 1: Global config
        if let Some(global_config_path) = Self::global_config_path() {
            config_builder =
                config_builder.add_source(config::File::from(global_config_path).required(false));
        }

        config_builder = config_builder
            // Layer 2: Local workspace config
            .add_source(config::File::with_name("skillpull").required(false))
            // Layer 3: Environment variables with SKILLPULL__ prefix
            .add_source(config::Environment::with_prefix("SKILLPULL").separator("__"));

        // Layer 4: Convenience env var overrides
        if let Some(token) = non_empty_var("SKILLS_GITHUB_TOKEN") {
            config_builder = config_builder.set_override("github.token", token)?;
        }

        if let Some(url) = non_empty_var("SKILLS_GITHUB_URL") {
            config_builder = config_builder.set_override("github.base_url", url)?;
        }

        let config: Self = config_builder.build()?.try_deserialize()?;
        Ok(config.expand_home())
    }

    /// Expand a leading `~/` in the store path
    fn expand_home(mut self) -> Self {
        if let Some(rest) = self.store.path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                self.store.path = home.join(rest).to_string_lossy().into_owned();
            }
        }
        self
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn from_toml(toml_str: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml))
            .build()
            .expect("Failed to build config")
            .try_deserialize()
            .expect("Failed to deserialize config")
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config, Config::default());
        assert_eq!(config.github.timeout_secs, 60);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_sections() {
        let config = from_toml(
            r#"
            [github]
            token = "ghp_test"
            timeout_secs = 5

            [store]
            path = "/srv/skills"

            [logging]
            level = "debug"
            format = "json"
            "#,
        );

        assert_eq!(config.github.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.github.timeout_secs, 5);
        assert_eq!(config.store.path, "/srv/skills");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_expand_home() {
        let mut config = Config::default();
        config.store.path = "~/skills".into();
        let expanded = config.expand_home();

        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expanded.store.path,
                home.join("skills").to_string_lossy().into_owned()
            );
        }
    }
}
