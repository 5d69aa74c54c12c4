use async_trait::async_trait;

use crate::core::errors::ExtractionError;
use crate::core::models::{ExtractionResult, ImageInput};

#[async_trait]
pub trait CardInfoExtractor: Send + Sync {
    async fn extract_card_info(&self, image: ImageInput) -> Result<ExtractionResult, ExtractionError>;
}
