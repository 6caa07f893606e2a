use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use sheetpress_core::BatchPolicy;
use sheetpress_engine::ClientSettings;
use sheetpress_logging::press_info;

use super::logging::LogDestination;

const DEFAULT_CONFIG_FILENAME: &str = "sheetpress.ron";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub artifact_dir: Option<PathBuf>,
    pub connect_timeout_secs: u64,
    /// `0` disables the request timeout.
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub clear_batch_on_success: bool,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: client.endpoint,
            artifact_dir: None,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.map_or(0, |t| t.as_secs()),
            max_bytes: client.max_bytes,
            clear_batch_on_success: false,
            log_destination: LogDestination::Terminal,
        }
    }
}

impl AppConfig {
    /// Reads `explicit`, or `./sheetpress.ron` when it exists, or falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILENAME);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config =
            Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))?;
        press_info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn client_settings(&self) -> ClientSettings {
        let defaults = ClientSettings::default();
        ClientSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: (self.request_timeout_secs > 0)
                .then(|| Duration::from_secs(self.request_timeout_secs)),
            max_bytes: self.max_bytes,
            artifact_dir: self.artifact_dir.clone().unwrap_or(defaults.artifact_dir),
        }
    }

    pub fn batch_policy(&self) -> BatchPolicy {
        if self.clear_batch_on_success {
            BatchPolicy::ClearOnSuccess
        } else {
            BatchPolicy::Keep
        }
    }
}
