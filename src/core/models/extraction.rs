use std::fmt;

use crate::global_constants;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPrompt(String);

impl ExtractionPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            return Self::default();
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ExtractionPrompt {
    fn default() -> Self {
        Self(global_constants::DEFAULT_EXTRACTION_PROMPT.to_string())
    }
}

/// Free text exactly as the model returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub text: String,
}

impl ExtractionResult {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
