mod vision_model_client;

pub use vision_model_client::VisionModelClient;
