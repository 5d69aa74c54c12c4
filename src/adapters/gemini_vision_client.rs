use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::adapters::gemini_protocol::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::core::errors::ExtractionError;
use crate::core::interfaces::adapters::VisionModelClient;
use crate::core::models::{Credential, ExtractionPrompt, ExtractionSettings, ImageInput};
use crate::global_constants::{self, LOG_TAG_GEMINI};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct GeminiVisionClient {
    http_client: reqwest::Client,
    api_base_url: String,
    model: String,
    credential: Option<Credential>,
    request_timeout: Duration,
}

impl GeminiVisionClient {
    pub fn build(
        api_base_url: &str,
        model: &str,
        credential: Option<Credential>,
        request_timeout: Duration,
    ) -> Result<Self, ExtractionError> {
        log::info!(
            "{} Initializing client for model {} at {}",
            LOG_TAG_GEMINI,
            model,
            api_base_url
        );

        if request_timeout.is_zero() {
            return Err(ExtractionError::configuration(
                "request timeout must be greater than zero",
            ));
        }

        if credential.is_none() {
            log::warn!(
                "{} No API key configured, extraction requests will be rejected",
                LOG_TAG_GEMINI
            );
        }

        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(request_timeout))
            .build()
            .map_err(|e| ExtractionError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            credential,
            request_timeout,
        })
    }

    pub fn from_settings(
        settings: &ExtractionSettings,
        credential: Option<Credential>,
    ) -> Result<Self, ExtractionError> {
        Self::build(
            &settings.api_base_url,
            &settings.model,
            credential,
            settings.request_timeout(),
        )
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base_url, self.model
        )
    }

    fn classify_transport_error(&self, error: reqwest::Error) -> ExtractionError {
        if error.is_timeout() {
            log::error!(
                "{} Request timed out after {:?}",
                LOG_TAG_GEMINI,
                self.request_timeout
            );
            return ExtractionError::Timeout {
                after: self.request_timeout,
            };
        }

        log::error!("{} Transport failure: {}", LOG_TAG_GEMINI, error);
        ExtractionError::network(error.to_string())
    }

    fn classify_error_response(
        status: StatusCode,
        retry_after_seconds: Option<u64>,
        body: &str,
    ) -> ExtractionError {
        let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
        let message = envelope
            .as_ref()
            .map(|envelope| envelope.error.message.clone())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| body.trim().to_string());

        log::error!(
            "{} Endpoint answered {} (error code {:?}, {}): {}",
            LOG_TAG_GEMINI,
            status.as_u16(),
            envelope.as_ref().and_then(|envelope| envelope.error.code),
            envelope
                .as_ref()
                .and_then(|envelope| envelope.error.status.as_deref())
                .unwrap_or("no status"),
            message
        );

        let invalid_api_key = envelope
            .as_ref()
            .is_some_and(|envelope| envelope.error.is_invalid_api_key());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ExtractionError::authentication(message)
            }
            StatusCode::BAD_REQUEST if invalid_api_key => ExtractionError::authentication(message),
            StatusCode::TOO_MANY_REQUESTS => ExtractionError::Throttled {
                retry_after_seconds,
            },
            _ => ExtractionError::upstream(Some(status.as_u16()), message),
        }
    }

    // Only the delay-seconds form is understood; an HTTP-date yields None.
    fn parse_retry_after(response: &reqwest::Response) -> Option<u64> {
        let raw_value = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)?
            .to_str()
            .ok()?;

        let seconds = raw_value.trim().parse::<u64>().ok();
        if seconds.is_none() {
            log::debug!(
                "{} Ignoring Retry-After value not in seconds: {}",
                LOG_TAG_GEMINI,
                raw_value
            );
        }
        seconds
    }
}

#[async_trait]
impl VisionModelClient for GeminiVisionClient {
    async fn generate_from_image(
        &self,
        prompt: &ExtractionPrompt,
        image: &ImageInput,
    ) -> Result<String, ExtractionError> {
        let credential = self.credential.as_ref().ok_or_else(|| {
            log::error!("{} Refusing to send request without API key", LOG_TAG_GEMINI);
            ExtractionError::authentication(format!(
                "no API key configured, set {}",
                global_constants::API_KEY_ENV_VAR
            ))
        })?;

        let request = GenerateContentRequest::for_image(
            prompt.as_str(),
            image.media_type().mime_type(),
            image.to_base64(),
        );
        let url = self.generate_content_url();

        log::debug!("{} POST {}", LOG_TAG_GEMINI, url);

        let response = self
            .http_client
            .post(&url)
            .header(global_constants::API_KEY_HEADER, credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        let retry_after_seconds = Self::parse_retry_after(&response);
        let body = response
            .text()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        if !status.is_success() {
            return Err(Self::classify_error_response(status, retry_after_seconds, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            log::error!("{} Could not parse response body: {}", LOG_TAG_GEMINI, e);
            ExtractionError::upstream(
                Some(status.as_u16()),
                format!("unparseable response: {}", e),
            )
        })?;

        match parsed.text() {
            Some(text) => {
                log::debug!(
                    "{} Received {} characters from {}",
                    LOG_TAG_GEMINI,
                    text.chars().count(),
                    self.model
                );
                Ok(text)
            }
            None => {
                let reason = parsed.missing_text_reason();
                log::error!("{} {}", LOG_TAG_GEMINI, reason);
                Err(ExtractionError::upstream(Some(status.as_u16()), reason))
            }
        }
    }
}
