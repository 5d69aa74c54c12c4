use std::fmt;

use crate::core::errors::ExtractionError;
use crate::global_constants;

#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ExtractionError> {
        let api_key = api_key.into();
        let trimmed = api_key.trim();

        if trimmed.is_empty() {
            return Err(ExtractionError::authentication("API key is empty"));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn from_env_var(var_name: &str) -> Result<Self, ExtractionError> {
        match std::env::var(var_name) {
            Ok(value) => Self::new(value).map_err(|_| {
                ExtractionError::authentication(format!("{} is set but empty", var_name))
            }),
            Err(_) => Err(ExtractionError::authentication(format!(
                "{} is not set",
                var_name
            ))),
        }
    }

    pub fn from_env() -> Result<Self, ExtractionError> {
        Self::from_env_var(global_constants::API_KEY_ENV_VAR)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted>")
    }
}
