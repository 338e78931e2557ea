use betsocial_core::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Not logged in")]
    NotLoggedIn,
}

impl ClientError {
    /// Whether a retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(e) => e.is_timeout() || e.is_connect(),
            ClientError::Api { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_retryability_by_status() {
        for status in [429u16, 502, 503, 504] {
            let err = ClientError::Api {
                status,
                message: "unavailable".to_string(),
            };
            assert!(err.is_retryable(), "status {}", status);
        }

        for status in [400u16, 401, 404, 409, 500] {
            let err = ClientError::Api {
                status,
                message: "nope".to_string(),
            };
            assert!(!err.is_retryable(), "status {}", status);
        }
    }

    #[test]
    fn test_application_errors_never_retry() {
        assert!(!ClientError::NotLoggedIn.is_retryable());
        assert!(!ClientError::NotFound("user".to_string()).is_retryable());
        assert!(!ClientError::Domain(DomainError::InsufficientFunds { need: 100, have: 0 })
            .is_retryable());
    }
}
