mod credential;
mod extraction;
mod extraction_settings;
mod image_format;
mod image_input;

pub use credential::Credential;
pub use extraction::{ExtractionPrompt, ExtractionResult};
pub use extraction_settings::ExtractionSettings;
pub use image_format::ImageMediaType;
pub use image_input::ImageInput;

#[cfg(test)]
pub(crate) use image_input::encode_test_image;
