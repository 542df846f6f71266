use thiserror::Error;

use crate::api::ApiError;
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CoachError {
    /// True when question generation failed and the user may retry setup.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            CoachError::Api(ApiError::Generation { .. } | ApiError::Network(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_api_errors() {
        let err: CoachError = ApiError::generation("No questions generated").into();
        assert_eq!(err.to_string(), "Backend error: No questions generated");
        assert!(err.is_generation_failure());
    }

    #[test]
    fn session_errors_are_not_generation_failures() {
        let err: CoachError = SessionError::EmptyRole.into();
        assert_eq!(err.to_string(), "Session error: role must not be empty");
        assert!(!err.is_generation_failure());
    }

    #[tokio::test]
    async fn network_errors_allow_setup_retry() {
        let transport = reqwest::get("http://127.0.0.1:1/").await.unwrap_err();
        let err: CoachError = ApiError::from(transport).into();
        assert!(matches!(err, CoachError::Api(ApiError::Network(_))));
        assert!(err.is_generation_failure());
    }

    #[test]
    fn evaluation_errors_are_not_generation_failures() {
        let err: CoachError = ApiError::evaluation("Failed to evaluate answer: Bad Gateway").into();
        assert!(!err.is_generation_failure());
    }
}
