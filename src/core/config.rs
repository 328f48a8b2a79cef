use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

use super::currency::CurrencyCode;

pub const DEFAULT_PRIMARY_URL: &str = "https://api.exchangerate-api.com/v4/latest";
pub const DEFAULT_FALLBACK_URL: &str = "https://api.exchangerate.host/latest";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProvidersConfig {
    #[serde(default = "default_primary")]
    pub primary: ProviderConfig,
    #[serde(default = "default_fallback")]
    pub fallback: ProviderConfig,
}

fn default_primary() -> ProviderConfig {
    ProviderConfig {
        base_url: DEFAULT_PRIMARY_URL.to_string(),
    }
}

fn default_fallback() -> ProviderConfig {
    ProviderConfig {
        base_url: DEFAULT_FALLBACK_URL.to_string(),
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            primary: default_primary(),
            fallback: default_fallback(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DefaultsConfig {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            from: CurrencyCode::from_static("USD"),
            to: CurrencyCode::from_static("INR"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Loads the config from the default location, or defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  primary:
    base_url: "http://example.com/primary"
  fallback:
    base_url: "http://example.com/fallback"
defaults:
  from: "eur"
  to: "GBP"
request_timeout_secs: 5
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.primary.base_url, "http://example.com/primary");
        assert_eq!(
            config.providers.fallback.base_url,
            "http://example.com/fallback"
        );
        assert_eq!(config.defaults.from.as_str(), "EUR");
        assert_eq!(config.defaults.to.as_str(), "GBP");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml_str = r#"
providers:
  fallback:
    base_url: "http://localhost:9999"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.providers.primary.base_url, DEFAULT_PRIMARY_URL);
        assert_eq!(config.providers.fallback.base_url, "http://localhost:9999");
        assert_eq!(config.defaults, DefaultsConfig::default());
        assert!(config.request_timeout().is_none());

        let empty: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(empty, AppConfig::default());
    }

    #[test]
    fn test_invalid_currency_is_rejected() {
        let yaml_str = r#"
defaults:
  from: "DOLLAR"
  to: "INR"
"#;
        assert!(serde_yaml::from_str::<AppConfig>(yaml_str).is_err());
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("missing.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
