//! Language model provider errors.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}

/// Assumed wait when a rate-limited response carries no `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECONDS: u64 = 60;

impl ProviderError {
    /// Classify a non-success HTTP response.
    pub fn from_api_response(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ProviderError::AuthenticationFailed(message),
            429 => ProviderError::RateLimited {
                retry_after_seconds: DEFAULT_RETRY_AFTER_SECONDS,
            },
            _ => ProviderError::ApiError { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_api_error() {
        let err = ProviderError::ApiError {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("Internal Server Error"));
    }

    #[test]
    fn test_provider_error_rate_limited() {
        let err = ProviderError::RateLimited {
            retry_after_seconds: 60,
        };
        assert!(err.to_string().contains("Rate limited"));
        assert!(err.to_string().contains("60"));
    }

    #[test]
    fn test_from_api_response() {
        assert!(matches!(
            ProviderError::from_api_response(401, "bad key".to_string()),
            ProviderError::AuthenticationFailed(m) if m == "bad key"
        ));
        assert!(matches!(
            ProviderError::from_api_response(403, String::new()),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ProviderError::from_api_response(429, String::new()),
            ProviderError::RateLimited { retry_after_seconds: DEFAULT_RETRY_AFTER_SECONDS }
        ));
        assert!(matches!(
            ProviderError::from_api_response(503, "down".to_string()),
            ProviderError::ApiError { status: 503, .. }
        ));
    }

    #[test]
    fn test_provider_error_timeout() {
        let err = ProviderError::Timeout(30);
        assert_eq!(err.to_string(), "Timeout after 30 seconds");
    }
}
