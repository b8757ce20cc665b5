use crate::engine::Backend;
use crate::index::types::{default_parallel_threshold, BuildOptions, IndexMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "kwic";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the app config directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Rotation backend used when `--engine` is not given
    #[serde(default)]
    pub backend: Backend,

    /// Merge all lines into one sorted sequence by default
    #[serde(default)]
    pub merge: bool,

    /// Numbered output with a summary by default
    #[serde(default)]
    pub verbose: bool,

    /// Detach a trailing URL from each line as its marker
    #[serde(default)]
    pub extract_urls: bool,

    /// Colorize terminal output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Work size above which the rapid backend goes parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_color() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            merge: false,
            verbose: false,
            extract_urls: false,
            color: default_color(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl AppConfig {
    /// Load config from the app config directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path, or return default if not found
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            log::debug!("no config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).context("Failed to read config file")?;
        let config: AppConfig =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the app config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(config_path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Build options derived from this config
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            mode: if self.merge {
                IndexMode::Merged
            } else {
                IndexMode::PerLine
            },
            extract_urls: self.extract_urls,
            backend: self.backend,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_config_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application config directory
pub fn get_app_config_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else {
        // Linux/Unix: XDG_CONFIG_HOME or ~/.config; Windows: %APPDATA%
        dirs::config_dir()
    };

    let base = base.context("Could not determine config directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.backend, Backend::Rapid);
        assert!(!config.merge);
        assert!(!config.verbose);
        assert!(!config.extract_urls);
        assert!(config.color);
        assert_eq!(config.parallel_threshold, 100_000);
    }

    #[test]
    fn test_app_config_serialization() {
        let config = AppConfig {
            backend: Backend::Reference,
            merge: true,
            parallel_threshold: 8,
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_app_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"merge": true, "backend": "reference"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert!(config.merge);
        assert_eq!(config.backend, Backend::Reference);
        assert!(!config.extract_urls); // default
    }

    #[test]
    fn test_app_config_empty_json() {
        // Empty object should use all defaults
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_build_options() {
        let config = AppConfig {
            merge: true,
            extract_urls: true,
            ..Default::default()
        };
        let opts = config.build_options();
        assert_eq!(opts.mode, IndexMode::Merged);
        assert!(opts.extract_urls);
    }

    #[test]
    fn test_load_missing_and_roundtrip_file() {
        let dir = std::env::temp_dir().join(format!("kwic_config_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        let _ = fs::remove_file(&path);

        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());

        let config = AppConfig {
            verbose: true,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);

        fs::write(&path, "not json").unwrap();
        assert!(AppConfig::load_from(&path).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
