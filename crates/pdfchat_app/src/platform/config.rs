use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use pdfchat_engine::{BackendSettings, DEFAULT_BASE_URL};
use pdfchat_logging::chat_info;
use serde::Deserialize;

use super::logging::LogDestination;

const CONFIG_FILENAME: &str = "pdfchat.ron";
const DEFAULT_LOG_FILE: &str = "pdfchat.log";
pub const BACKEND_URL_ENV: &str = "PDFCHAT_BACKEND_URL";

/// Client settings read from `pdfchat.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub backend_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub upload_chunk_kib: usize,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let backend = BackendSettings::default();
        Self {
            backend_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: backend.connect_timeout.as_secs(),
            request_timeout_secs: None,
            upload_chunk_kib: backend.upload_chunk_bytes / 1024,
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl ClientConfig {
    /// Loads `explicit` if given (it must exist), otherwise `./pdfchat.ron` if present.
    pub fn load(explicit: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = PathBuf::from(CONFIG_FILENAME);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_backend_override(std::env::var(BACKEND_URL_ENV).ok()))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = ron::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        chat_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn with_backend_override(mut self, backend_url: Option<String>) -> Self {
        if let Some(url) = backend_url.filter(|url| !url.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        self
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.backend_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            upload_chunk_bytes: self.upload_chunk_kib.max(1) * 1024,
        }
    }
}
