pub mod adapters;
pub mod app;
pub mod core;
pub mod global_constants;

pub use crate::app::CardReaderApp;
pub use crate::core::errors::ExtractionError;
pub use crate::core::interfaces::ports::CardInfoExtractor;
pub use crate::core::models::{
    Credential, ExtractionPrompt, ExtractionResult, ExtractionSettings, ImageInput, ImageMediaType,
};
pub use crate::core::orchestrators::CardExtractionService;
