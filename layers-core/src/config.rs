use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    clothing::ClothingConfig,
    forecast::DEFAULT_MAX_ATTEMPTS,
    scoring::ScoringConfig,
};

pub const NWS_BASE_URL: &str = "https://api.weather.gov/";

/// Accepted range for a personal comfort temperature, in °F.
pub const COMFORT_TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 50.0..=90.0;

/// Connection settings for weather.gov.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NwsConfig {
    pub base_url: String,
    /// Application name sent in the User-Agent.
    pub app_name: String,
    /// Email or URL where the service operators can reach you.
    pub contact: String,
    pub timeout_secs: u64,
    pub max_attempts: u32,
}

impl Default for NwsConfig {
    fn default() -> Self {
        Self {
            base_url: NWS_BASE_URL.to_string(),
            app_name: "WeatherLayers".to_string(),
            contact: "you@example.com".to_string(),
            timeout_secs: 12,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl NwsConfig {
    pub fn user_agent(&self) -> String {
        format!("{} (contact: {})", self.app_name, self.contact)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// comfort_temperature = 68.0
///
/// [nws]
/// contact = "me@example.com"
///
/// [scoring.forecast_scores]
/// "chance light rain" = -3.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub nws: NwsConfig,

    /// Personal comfort temperature; overrides `scoring.comfort_temperature`.
    pub comfort_temperature: Option<f64>,

    pub scoring: ScoringConfig,
    pub clothing: ClothingConfig,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    /// `NWS_APP_NAME` and `NWS_CONTACT` override the stored identity.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };

        cfg.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(comfort) = cfg.comfort_temperature {
            validate_comfort_temperature(comfort)
                .with_context(|| format!("Invalid config file: {}", path.display()))?;
        }

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-layers", "weather-layers")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("NWS_APP_NAME").filter(|v| !v.trim().is_empty()) {
            self.nws.app_name = name;
        }
        if let Some(contact) = lookup("NWS_CONTACT").filter(|v| !v.trim().is_empty()) {
            self.nws.contact = contact;
        }
    }

    /// Scoring settings with the personal comfort temperature applied.
    pub fn scoring_config(&self) -> ScoringConfig {
        match self.comfort_temperature {
            Some(comfort) => self.scoring.clone().with_comfort_temperature(comfort),
            None => self.scoring.clone(),
        }
    }
}

/// Check a caller-supplied comfort temperature against the accepted range.
pub fn validate_comfort_temperature(value: f64) -> Result<f64> {
    if !COMFORT_TEMPERATURE_RANGE.contains(&value) {
        bail!(
            "Comfort temperature {value}°F is out of range.\n\
             Hint: choose a value between {} and {}°F.",
            COMFORT_TEMPERATURE_RANGE.start(),
            COMFORT_TEMPERATURE_RANGE.end()
        );
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::DEFAULT_COMFORT_TEMPERATURE;

    #[test]
    fn default_user_agent_identifies_app_and_contact() {
        let cfg = Config::default();
        assert_eq!(cfg.nws.user_agent(), "WeatherLayers (contact: you@example.com)");
    }

    #[test]
    fn env_overrides_identity() {
        let mut cfg = Config::default();
        cfg.apply_env_overrides(|key| match key {
            "NWS_CONTACT" => Some("ops@example.org".to_string()),
            "NWS_APP_NAME" => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(cfg.nws.contact, "ops@example.org");
        assert_eq!(cfg.nws.app_name, "WeatherLayers");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            comfort_temperature = 65.0

            [nws]
            contact = "me@example.com"

            [scoring.forecast_scores]
            "chance light rain" = -3
            "#,
        )
        .expect("partial config parses");

        assert_eq!(cfg.nws.contact, "me@example.com");
        assert_eq!(cfg.nws.base_url, NWS_BASE_URL);
        assert_eq!(cfg.nws.max_attempts, 3);
        assert_eq!(cfg.scoring.forecast_scores.get("chance light rain"), Some(&-3.0));
        assert_eq!(cfg.clothing.limits.max_layers, 5);
        assert_eq!(cfg.scoring_config().comfort_temperature, 65.0);
    }

    #[test]
    fn comfort_defaults_to_seventy() {
        let cfg = Config::default();
        assert_eq!(cfg.scoring_config().comfort_temperature, DEFAULT_COMFORT_TEMPERATURE);
    }

    #[test]
    fn comfort_temperature_range_is_enforced() {
        assert!(validate_comfort_temperature(50.0).is_ok());
        assert!(validate_comfort_temperature(90.0).is_ok());

        let err = validate_comfort_temperature(95.0).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(validate_comfort_temperature(f64::NAN).is_err());
    }
}
