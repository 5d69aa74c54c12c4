use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::adapters::GeminiVisionClient;
use crate::core::models::{Credential, ExtractionResult, ExtractionSettings, ImageInput};
use crate::core::orchestrators::CardExtractionService;
use crate::global_constants::{self, LOG_TAG_APP};

pub struct CardReaderApp {
    settings: ExtractionSettings,
    extraction_service: Arc<CardExtractionService>,
}

impl CardReaderApp {
    pub fn build() -> anyhow::Result<Self> {
        log::info!("{} Initializing {}", LOG_TAG_APP, global_constants::APPLICATION_NAME);

        let settings = Self::resolve_settings(
            ExtractionSettings::load(),
            std::env::var(global_constants::MODEL_OVERRIDE_ENV_VAR).ok(),
        );

        let credential = match Credential::from_env() {
            Ok(credential) => Some(credential),
            Err(e) => {
                log::warn!("{} {}", LOG_TAG_APP, e);
                None
            }
        };

        Self::build_with(settings, credential)
    }

    /// Falls back to defaults when loading fails; the model override applies either way.
    fn resolve_settings(
        loaded: anyhow::Result<ExtractionSettings>,
        model_override: Option<String>,
    ) -> ExtractionSettings {
        let mut settings = loaded.unwrap_or_else(|e| {
            log::warn!("{} Failed to load settings: {}, using defaults", LOG_TAG_APP, e);
            ExtractionSettings::default()
        });
        settings.apply_model_override(model_override);
        settings
    }

    pub fn build_with(
        settings: ExtractionSettings,
        credential: Option<Credential>,
    ) -> anyhow::Result<Self> {
        settings.validate().context("Invalid extraction settings")?;

        let vision_model_client = GeminiVisionClient::from_settings(&settings, credential)
            .context("Failed to initialize Gemini client")?;

        let extraction_service = Arc::new(CardExtractionService::build(
            Arc::new(vision_model_client),
            settings.prompt(),
            settings.request_timeout(),
        ));

        log::info!("{} Ready, using model {}", LOG_TAG_APP, settings.model);

        Ok(Self {
            settings,
            extraction_service,
        })
    }

    pub fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    pub fn extraction_service(&self) -> Arc<CardExtractionService> {
        Arc::clone(&self.extraction_service)
    }

    pub async fn extract_from_file(&self, image_path: &Path) -> anyhow::Result<ExtractionResult> {
        log::info!("{} Reading card image {:?}", LOG_TAG_APP, image_path);

        let image_data = tokio::fs::read(image_path)
            .await
            .with_context(|| format!("Failed to read image {:?}", image_path))?;
        let image = ImageInput::from_bytes(image_data)?;

        let result = self.extraction_service.extract_card_info(image).await?;
        Ok(result)
    }
}
