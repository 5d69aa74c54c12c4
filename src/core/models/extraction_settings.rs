use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::models::ExtractionPrompt;
use crate::global_constants;

fn default_model() -> String {
    global_constants::DEFAULT_MODEL.to_string()
}

fn default_extraction_prompt() -> String {
    global_constants::DEFAULT_EXTRACTION_PROMPT.to_string()
}

fn default_api_base_url() -> String {
    global_constants::DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_seconds() -> u64 {
    global_constants::DEFAULT_REQUEST_TIMEOUT_SECONDS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_extraction_prompt")]
    pub extraction_prompt: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            extraction_prompt: default_extraction_prompt(),
            api_base_url: default_api_base_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl ExtractionSettings {
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_file_path()?;
        Self::load_from_path(&settings_path)
    }

    pub fn load_from_path(settings_path: &Path) -> anyhow::Result<Self> {
        if !settings_path.exists() {
            log::info!(
                "{} No settings file at {:?}, using defaults",
                global_constants::LOG_TAG_SETTINGS,
                settings_path
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(settings_path)
            .with_context(|| format!("Failed to read settings from {:?}", settings_path))?;
        let settings: ExtractionSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {:?}", settings_path))?;

        settings.validate()?;

        log::info!(
            "{} Loaded settings from {:?}",
            global_constants::LOG_TAG_SETTINGS,
            settings_path
        );
        log::debug!(
            "{} Model: {}, endpoint: {}, timeout: {}s",
            global_constants::LOG_TAG_SETTINGS,
            settings.model,
            settings.api_base_url,
            settings.request_timeout_seconds
        );

        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.request_timeout_seconds == 0 {
            anyhow::bail!("request_timeout_seconds must be greater than zero");
        }
        if self.model.trim().is_empty() {
            anyhow::bail!("model must not be empty");
        }
        Ok(())
    }

    pub fn apply_model_override(&mut self, model_override: Option<String>) {
        if let Some(model) = model_override {
            let model = model.trim();
            if !model.is_empty() {
                log::info!(
                    "{} Model overridden from environment: {}",
                    global_constants::LOG_TAG_SETTINGS,
                    model
                );
                self.model = model.to_string();
            }
        }
    }

    pub fn prompt(&self) -> ExtractionPrompt {
        ExtractionPrompt::new(self.extraction_prompt.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::APPLICATION_DIR_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}
