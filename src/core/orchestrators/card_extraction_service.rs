use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::errors::ExtractionError;
use crate::core::interfaces::adapters::VisionModelClient;
use crate::core::interfaces::ports::CardInfoExtractor;
use crate::core::models::{ExtractionPrompt, ExtractionResult, ImageInput};
use crate::global_constants::LOG_TAG_EXTRACTION;

/// Sends one card image per call to the vision model and hands back its text untouched.
///
/// Holds no per-call state, so a single instance can serve concurrent extractions.
/// Failures are classified and returned; nothing is retried here.
pub struct CardExtractionService {
    vision_model_client: Arc<dyn VisionModelClient>,
    prompt: ExtractionPrompt,
    request_timeout: Duration,
}

impl CardExtractionService {
    pub fn build(
        vision_model_client: Arc<dyn VisionModelClient>,
        prompt: ExtractionPrompt,
        request_timeout: Duration,
    ) -> Self {
        log::debug!(
            "{} Service built with timeout {:?}",
            LOG_TAG_EXTRACTION,
            request_timeout
        );

        Self {
            vision_model_client,
            prompt,
            request_timeout,
        }
    }

    pub fn prompt(&self) -> &ExtractionPrompt {
        &self.prompt
    }

    pub async fn extract_card_info(
        &self,
        image: ImageInput,
    ) -> Result<ExtractionResult, ExtractionError> {
        self.extract_card_info_until(image, std::future::pending())
            .await
    }

    /// Like [`extract_card_info`](Self::extract_card_info), but abandons the in-flight
    /// request as soon as `cancel` resolves.
    pub async fn extract_card_info_until<C>(
        &self,
        image: ImageInput,
        cancel: C,
    ) -> Result<ExtractionResult, ExtractionError>
    where
        C: Future<Output = ()> + Send,
    {
        let request_id = Uuid::new_v4();
        let (width, height) = image.dimensions();

        log::info!(
            "{} [{}] Extracting card info from {} image {}x{} ({} bytes)",
            LOG_TAG_EXTRACTION,
            request_id,
            image.media_type(),
            width,
            height,
            image.byte_len()
        );

        let started_at = Instant::now();
        let model_call = tokio::time::timeout(
            self.request_timeout,
            self.vision_model_client
                .generate_from_image(&self.prompt, &image),
        );

        let outcome = tokio::select! {
            biased;
            _ = cancel => {
                log::warn!("{} [{}] Extraction cancelled by caller", LOG_TAG_EXTRACTION, request_id);
                return Err(ExtractionError::Cancelled);
            }
            outcome = model_call => outcome,
        };

        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(error)) => {
                log::error!(
                    "{} [{}] Extraction failed after {:?}: {}",
                    LOG_TAG_EXTRACTION,
                    request_id,
                    started_at.elapsed(),
                    error
                );
                return Err(error);
            }
            Err(_) => {
                log::error!(
                    "{} [{}] Extraction timed out after {:?}",
                    LOG_TAG_EXTRACTION,
                    request_id,
                    self.request_timeout
                );
                return Err(ExtractionError::Timeout {
                    after: self.request_timeout,
                });
            }
        };

        if text.trim().is_empty() {
            log::error!(
                "{} [{}] Model answered with empty text",
                LOG_TAG_EXTRACTION,
                request_id
            );
            return Err(ExtractionError::upstream(
                None,
                "model response contained no text",
            ));
        }

        log::info!(
            "{} [{}] Extraction complete in {:?}, {} characters",
            LOG_TAG_EXTRACTION,
            request_id,
            started_at.elapsed(),
            text.chars().count()
        );

        Ok(ExtractionResult::new(text))
    }
}

#[async_trait]
impl CardInfoExtractor for CardExtractionService {
    async fn extract_card_info(
        &self,
        image: ImageInput,
    ) -> Result<ExtractionResult, ExtractionError> {
        CardExtractionService::extract_card_info(self, image).await
    }
}
