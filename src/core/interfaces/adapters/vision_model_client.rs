use async_trait::async_trait;

use crate::core::errors::ExtractionError;
use crate::core::models::{ExtractionPrompt, ImageInput};

#[async_trait]
pub trait VisionModelClient: Send + Sync {
    async fn generate_from_image(
        &self,
        prompt: &ExtractionPrompt,
        image: &ImageInput,
    ) -> Result<String, ExtractionError>;
}
