use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::domain::error::{AppError, Result};
use crate::domain::kb_config::{KnowledgeBaseConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_UPLOAD_URL};

/// Optional settings file, read from the working directory
pub const CONFIG_FILE: &str = "kb-upload.toml";

/// `VOICEFLOW_API_KEY`, `VOICEFLOW_UPLOAD_URL`, ...
pub const ENV_PREFIX: &str = "VOICEFLOW_";

/// Settings as read, before the API key is required
#[derive(Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    pub upload_url: String,
    pub overwrite: bool,
    pub timeout_secs: u64,
}

impl Default for KnowledgeBaseSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            overwrite: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Defaults, then the TOML file, then `VOICEFLOW_*` variables (a `.env` file
/// counts as environment).
pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::layered(Path::new(CONFIG_FILE))
    }

    /// Layer an explicitly named settings file. Unlike the default
    /// `kb-upload.toml`, it must exist.
    pub fn from_file(config_file: &Path) -> Result<Self> {
        if !config_file.is_file() {
            return Err(AppError::ConfigError(format!(
                "Config file not found: {}",
                config_file.display()
            )));
        }
        Ok(Self::layered(config_file))
    }

    pub fn layered(config_file: &Path) -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }

        Self::from_figment(
            Figment::from(Serialized::defaults(KnowledgeBaseSettings::default()))
                .merge(Toml::file(config_file))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn settings(&self) -> Result<KnowledgeBaseSettings> {
        self.figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to read settings: {}", e)))
    }

    /// Validated client configuration. A missing or blank API key is fatal
    /// for anything that uploads.
    pub fn knowledge_base_config(&self) -> Result<KnowledgeBaseConfig> {
        let settings = self.settings()?;

        let api_key = settings
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("Missing VOICEFLOW_API_KEY in .env file".to_string())
            })?;

        Url::parse(&settings.upload_url).map_err(|e| {
            AppError::ConfigError(format!(
                "Invalid VOICEFLOW_UPLOAD_URL {}: {}",
                settings.upload_url, e
            ))
        })?;

        if settings.timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "VOICEFLOW_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(KnowledgeBaseConfig {
            api_key,
            upload_url: settings.upload_url,
            overwrite: settings.overwrite,
            timeout_secs: settings.timeout_secs,
        })
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
