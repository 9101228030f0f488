//! Shared HTTP plumbing for provider and research adapters

use chorus_application::{ProviderError, ResearchError};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Maximum characters of an error body kept in error messages.
const ERROR_BODY_CHARS: usize = 300;

/// Failure of one HTTP exchange, before it is mapped to a port error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HttpFailure {
    Auth(String),
    RateLimited(String),
    Timeout,
    Status { status: u16, message: String },
    Malformed(String),
    Request(String),
}

impl HttpFailure {
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = error_message(body);
        match status {
            401 | 403 => HttpFailure::Auth(message),
            429 => HttpFailure::RateLimited(message),
            _ => HttpFailure::Status { status, message },
        }
    }

    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HttpFailure::Timeout
        } else if e.is_decode() {
            HttpFailure::Malformed(e.to_string())
        } else {
            HttpFailure::Request(e.to_string())
        }
    }
}

impl From<HttpFailure> for ProviderError {
    fn from(failure: HttpFailure) -> Self {
        match failure {
            HttpFailure::Auth(m) => ProviderError::Auth(m),
            HttpFailure::RateLimited(m) => ProviderError::RateLimited(m),
            HttpFailure::Timeout => ProviderError::Timeout,
            HttpFailure::Status { status, message } => ProviderError::Http { status, message },
            HttpFailure::Malformed(m) => ProviderError::MalformedResponse(m),
            HttpFailure::Request(m) => ProviderError::Request(m),
        }
    }
}

impl From<HttpFailure> for ResearchError {
    fn from(failure: HttpFailure) -> Self {
        match failure {
            HttpFailure::Auth(m) => ResearchError::Auth(m),
            HttpFailure::RateLimited(m) => ResearchError::RateLimited(m),
            HttpFailure::Timeout => ResearchError::Timeout,
            HttpFailure::Status { status, message } => ResearchError::Http { status, message },
            HttpFailure::Malformed(m) => ResearchError::MalformedResponse(m),
            HttpFailure::Request(m) => ResearchError::Request(m),
        }
    }
}

/// Build a client with a whole-request timeout.
pub(crate) fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!("Could not build HTTP client with timeout ({}), using defaults", e);
            reqwest::Client::new()
        })
}

/// Send a request and decode a JSON success body.
pub(crate) async fn send_json<R: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<R, HttpFailure> {
    let response = request.send().await.map_err(HttpFailure::from_reqwest)?;
    let status = response.status();
    let body = response.text().await.map_err(HttpFailure::from_reqwest)?;
    debug!(status = %status, bytes = body.len(), "HTTP response received");

    if !status.is_success() {
        return Err(HttpFailure::from_status(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| HttpFailure::Malformed(e.to_string()))
}

/// Pull `error.message` out of a JSON error body, else a truncated body.
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| v.pointer("/error/message"))
        .and_then(|m| m.as_str());
    match message {
        Some(m) => m.to_string(),
        None => body.chars().take(ERROR_BODY_CHARS).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(HttpFailure::from_status(401, ""), HttpFailure::Auth(_)));
        assert!(matches!(HttpFailure::from_status(403, ""), HttpFailure::Auth(_)));
        assert!(matches!(
            HttpFailure::from_status(429, ""),
            HttpFailure::RateLimited(_)
        ));
        assert_eq!(
            HttpFailure::from_status(500, "boom"),
            HttpFailure::Status {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_error_message_prefers_json_message() {
        let body = r#"{"error":{"type":"invalid_request_error","message":"max_tokens too large"}}"#;
        assert_eq!(error_message(body), "max_tokens too large");
    }

    #[test]
    fn test_error_message_truncates_plain_body() {
        let body = "x".repeat(1000);
        assert_eq!(error_message(&body).len(), ERROR_BODY_CHARS);
    }

    #[test]
    fn test_provider_error_conversion() {
        let err: ProviderError = HttpFailure::Timeout.into();
        assert_eq!(err, ProviderError::Timeout);
        let err: ResearchError = HttpFailure::Malformed("bad".to_string()).into();
        assert_eq!(err, ResearchError::MalformedResponse("bad".to_string()));
    }
}
