/// Sync tool configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default = "default_device")]
    pub device: DeviceSettings,

    #[serde(default = "default_sync")]
    pub sync: SyncSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceSettings {
    /// Known device URL; discovery is skipped when set
    #[serde(default)]
    pub url: Option<String>,

    /// Browse server port used when sweeping the local network
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deadline for one discovery scan, in seconds
    #[serde(default = "default_discovery_timeout_secs")]
    pub discovery_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncSettings {
    /// Seconds between watch-mode sync cycles
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Per-file retries for transient network failures
    #[serde(default = "default_download_retries")]
    pub download_retries: u32,
}

impl SyncConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables. Sections are separated with
        // "__" so multi-word keys survive, e.g.
        // SUPERNOTE_SYNC__POLL_INTERVAL_SECS -> sync.poll_interval_secs.
        settings = settings.add_source(
            config::Environment::with_prefix("SUPERNOTE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.sync.poll_interval_secs == 0 {
            return Err(CliError::Config(
                "poll interval must be at least 1 second".to_string(),
            ));
        }

        if let Some(url) = &self.device.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CliError::Config(format!(
                    "device URL must start with http:// or https:// (got {url})"
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_device() -> DeviceSettings {
    DeviceSettings {
        url: None,
        port: default_port(),
        discovery_timeout_secs: default_discovery_timeout_secs(),
    }
}

fn default_port() -> u16 {
    supernote_discovery::DEFAULT_PORT
}

fn default_discovery_timeout_secs() -> u64 {
    15
}

fn default_sync() -> SyncSettings {
    SyncSettings {
        poll_interval_secs: default_poll_interval_secs(),
        download_retries: default_download_retries(),
    }
}

fn default_poll_interval_secs() -> u64 {
    600
}

fn default_download_retries() -> u32 {
    3
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            sync: default_sync(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.device.port, 8089);
        assert_eq!(config.sync.poll_interval_secs, 600);
        assert_eq!(config.sync.download_retries, 3);
        assert!(config.device.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut config = SyncConfig::default();
        config.sync.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_nested_settings() {
        std::env::set_var("SUPERNOTE_SYNC__POLL_INTERVAL_SECS", "123");
        std::env::set_var("SUPERNOTE_DEVICE__DISCOVERY_TIMEOUT_SECS", "9");

        let config = SyncConfig::load().unwrap();

        std::env::remove_var("SUPERNOTE_SYNC__POLL_INTERVAL_SECS");
        std::env::remove_var("SUPERNOTE_DEVICE__DISCOVERY_TIMEOUT_SECS");

        assert_eq!(config.sync.poll_interval_secs, 123);
        assert_eq!(config.device.discovery_timeout_secs, 9);
        // Untouched settings keep their defaults
        assert_eq!(config.sync.download_retries, 3);
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let mut config = SyncConfig::default();
        config.device.url = Some("192.168.1.20:8089".to_string());
        assert!(config.validate().is_err());

        config.device.url = Some("http://192.168.1.20:8089".to_string());
        assert!(config.validate().is_ok());
    }
}
