use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("upstream error{}: {message}", format_status(.status))]
    Upstream { status: Option<u16>, message: String },

    #[error("rate limited by endpoint{}", format_retry_after(.retry_after_seconds))]
    Throttled { retry_after_seconds: Option<u64> },

    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },

    #[error("extraction cancelled")]
    Cancelled,

    #[error("invalid configuration: {message}")]
    Configuration { message: String },
}

fn format_status(status: &Option<u16>) -> String {
    status.map(|code| format!(" ({})", code)).unwrap_or_default()
}

fn format_retry_after(retry_after_seconds: &Option<u64>) -> String {
    retry_after_seconds
        .map(|seconds| format!(", retry after {}s", seconds))
        .unwrap_or_default()
}

impl ExtractionError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Timeouts are a specialization of network failures.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }

    /// Advisory only. Nothing in this crate retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } | Self::Throttled { .. } => true,
            Self::Upstream {
                status: Some(code), ..
            } => *code >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_counts_as_network_error() {
        let error = ExtractionError::Timeout {
            after: Duration::from_secs(5),
        };

        assert!(error.is_network());
        assert!(ExtractionError::network("connection reset").is_network());
        assert!(!ExtractionError::upstream(Some(500), "boom").is_network());
    }

    #[test]
    fn test_upstream_display_preserves_status_and_message() {
        let error = ExtractionError::upstream(Some(500), "Internal error encountered.");

        assert_eq!(
            error.to_string(),
            "upstream error (500): Internal error encountered."
        );
    }

    #[test]
    fn test_upstream_display_without_status() {
        let error = ExtractionError::upstream(None, "response contained no text");

        assert_eq!(error.to_string(), "upstream error: response contained no text");
    }

    #[test]
    fn test_throttled_display_includes_retry_after_when_known() {
        let with_hint = ExtractionError::Throttled {
            retry_after_seconds: Some(30),
        };
        let without_hint = ExtractionError::Throttled {
            retry_after_seconds: None,
        };

        assert_eq!(with_hint.to_string(), "rate limited by endpoint, retry after 30s");
        assert_eq!(without_hint.to_string(), "rate limited by endpoint");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ExtractionError::upstream(Some(503), "unavailable").is_retryable());
        assert!(!ExtractionError::upstream(Some(400), "bad request").is_retryable());
        assert!(!ExtractionError::upstream(None, "empty").is_retryable());
        assert!(!ExtractionError::authentication("missing key").is_retryable());
        assert!(!ExtractionError::invalid_image("empty").is_retryable());
        assert!(!ExtractionError::configuration("zero timeout").is_retryable());
        assert!(ExtractionError::Throttled {
            retry_after_seconds: None
        }
        .is_retryable());
    }
}
