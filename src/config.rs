use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// List files, in lookup priority order.
    #[serde(default)]
    pub lists: Vec<PathBuf>,

    #[serde(default = "default_reload_interval")]
    pub reload_interval_secs: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Defaults
fn default_reload_interval() -> u64 {
    300
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lists: vec![],
            reload_interval_secs: default_reload_interval(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse config TOML")?;
        Ok(config)
    }

    /// List paths in configured order, later duplicates dropped.
    pub fn list_paths(&self) -> Vec<PathBuf> {
        let mut seen = FxHashSet::default();
        let mut paths = Vec::with_capacity(self.lists.len());
        for path in &self.lists {
            if seen.insert(path.as_path()) {
                paths.push(path.clone());
            }
        }
        paths
    }

    /// Reload interval, never shorter than one second.
    pub fn reload_interval(&self) -> Duration {
        Duration::from_secs(self.reload_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.lists.is_empty());
        assert_eq!(config.reload_interval(), Duration::from_secs(300));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            lists = ["/etc/namelist/gfw.txt", "/etc/namelist/extra.conf", "/etc/namelist/gfw.txt"]
            reload_interval_secs = 0

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.list_paths(),
            vec![
                PathBuf::from("/etc/namelist/gfw.txt"),
                PathBuf::from("/etc/namelist/extra.conf"),
            ]
        );
        assert_eq!(config.reload_interval(), Duration::from_secs(1));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_bad_toml() {
        assert!(Config::from_toml("lists = 3").is_err());
    }
}
