pub const APPLICATION_NAME: &str = "Disk Van Card Reader";
pub const APPLICATION_DIR_NAME: &str = "disk-van-card-reader";

pub const LOG_TAG_APP: &str = "[APP]";
pub const LOG_TAG_EXTRACTION: &str = "[EXTRACTION]";
pub const LOG_TAG_GEMINI: &str = "[GEMINI]";
pub const LOG_TAG_SETTINGS: &str = "[SETTINGS]";
pub const LOG_TAG_IMAGE_INPUT: &str = "[IMAGE_INPUT]";

pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_OVERRIDE_ENV_VAR: &str = "CARD_READER_MODEL";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 60;

pub const DEFAULT_EXTRACTION_PROMPT: &str = "Extract all text and details from this business card. Identify the name, business name, routes, phone number, and any other relevant information for a transportation service website.";

pub const API_KEY_HEADER: &str = "x-goog-api-key";
pub const API_KEY_INVALID_REASON: &str = "API_KEY_INVALID";

// Gemini rejects inline payloads above this size.
pub const MAX_INLINE_IMAGE_BYTES: usize = 20 * 1024 * 1024;

pub const SETTINGS_FILE_NAME: &str = "settings.json";
