use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::store::{FileStore, MemoryStore, ReadingStore, StoreError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("storage.data_folder is required for the file backend")]
    MissingDataFolder,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub request_timeout: Duration,
}

impl Default for WebConfig {
    fn default() -> Self {
        WebConfig {
            bind: default_bind(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    #[serde(default)]
    pub data_folder: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum OpenStoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StorageConfig {
    pub fn open(&self) -> Result<Arc<dyn ReadingStore>, OpenStoreError> {
        match self.backend {
            StorageBackend::Memory => {
                log::warn!("Using in-memory reading store; data is lost on exit");
                Ok(Arc::new(MemoryStore::new()))
            }
            StorageBackend::File => {
                let folder = self
                    .data_folder
                    .as_ref()
                    .ok_or(ConfigError::MissingDataFolder)?;
                Ok(Arc::new(FileStore::open(folder)?))
            }
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        if config.storage.backend == StorageBackend::File && config.storage.data_folder.is_none()
        {
            return Err(ConfigError::MissingDataFolder);
        }
        Ok(config)
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(raw.trim()).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = Config::from_str(
            r#"
web:
  bind: "127.0.0.1:9000"
  request_timeout: "2s 500ms"
storage:
  backend: file
  data_folder: /var/lib/telemetry
"#,
        )
        .unwrap();

        assert_eq!(config.web.bind, "127.0.0.1:9000");
        assert_eq!(config.web.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(
            config.storage.data_folder,
            Some(PathBuf::from("/var/lib/telemetry"))
        );
    }

    #[test]
    fn web_section_is_optional() {
        let config = Config::from_str("storage:\n  backend: memory\n").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.web.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn file_backend_needs_folder() {
        assert!(matches!(
            Config::from_str("storage:\n  backend: file\n"),
            Err(ConfigError::MissingDataFolder)
        ));
    }

    #[test]
    fn rejects_bad_duration() {
        let yaml = "web:\n  request_timeout: soon\nstorage:\n  backend: memory\n";
        assert!(matches!(Config::from_str(yaml), Err(ConfigError::Yaml(_))));
    }
}
