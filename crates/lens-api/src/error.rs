//! Error types for the HTTP clients

use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Errors raised while talking to the text-analytics or market-data APIs
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success HTTP status
    #[error("HTTP {status} from {provider}: {body}")]
    Http {
        provider: String,
        status: u16,
        body: String,
    },

    /// Rate limit exceeded for API
    #[error("Rate limit exceeded for {provider}")]
    RateLimited { provider: String },

    /// The provider reported an error inside a successful response
    #[error("Provider error: {0}")]
    Provider(String),

    /// The analysis response did not contain our document
    #[error("Response contained no document")]
    EmptyDocument,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed endpoint URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Error for a non-success status from `provider`
    ///
    /// 429 means the provider throttled us; everything else keeps the status
    /// and body for the message.
    pub fn from_status(provider: &str, status: StatusCode, body: String) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return ApiError::RateLimited {
                provider: provider.to_string(),
            };
        }
        ApiError::Http {
            provider: provider.to_string(),
            status: status.as_u16(),
            body,
        }
    }
}

/// Pass successful responses through, turn the rest into [`ApiError`]
pub(crate) async fn check_status(provider: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(provider, status, body))
}

/// Convert ApiError to lens_core::Error
impl From<ApiError> for lens_core::Error {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Config(msg) => lens_core::Error::Config(msg),
            ApiError::Url(e) => lens_core::Error::Config(e.to_string()),
            ApiError::Json(_) | ApiError::EmptyDocument | ApiError::Provider(_) => {
                lens_core::Error::InvalidResponse(err.to_string())
            },
            _ => lens_core::Error::Upstream(err.to_string()),
        }
    }
}
