//! API configuration

use serde::Deserialize;
use std::time::Duration;

use app_state::{UploadSettings, DEFAULT_ACTOR};
use domain_claims::ingest::DEFAULT_MAX_FILE_MB;
use infra_mock::MockConfig;

/// API configuration
///
/// Nested mock settings use a double underscore, e.g.
/// `API_MOCK__LATENCY__UPLOAD_MS=0`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Largest accepted claims file
    pub max_upload_mb: u64,
    /// Milliseconds between upload progress ticks
    pub progress_tick_ms: u64,
    /// Name recorded on notes and audit entries
    pub actor: String,
    /// Mock backend behaviour
    pub mock: MockConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            max_upload_mb: DEFAULT_MAX_FILE_MB,
            progress_tick_ms: 200,
            actor: DEFAULT_ACTOR.to_string(),
            mock: MockConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("API")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upload workflow settings derived from this configuration
    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            max_file_mb: self.max_upload_mb,
            progress_tick: Duration::from_millis(self.progress_tick_ms),
            actor: self.actor.clone(),
        }
    }

    /// Request body limit for uploads, leaving room for the size check to
    /// report oversized files itself
    pub fn upload_body_limit(&self) -> usize {
        let bytes = self.max_upload_mb.saturating_add(1).saturating_mul(1024 * 1024);
        usize::try_from(bytes).unwrap_or(usize::MAX)
    }
}
