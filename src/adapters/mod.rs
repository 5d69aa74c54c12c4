mod gemini_protocol;
mod gemini_vision_client;

pub use gemini_vision_client::GeminiVisionClient;
