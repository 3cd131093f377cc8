use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single call to one of the two external services.
///
/// Callers decide what a failure means: the connectivity check treats any
/// variant as fatal, while per-string generation/translation degrades to a
/// fallback value and logs a warning.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced a response (connect error, timeout, etc.)
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    /// A 2xx response that carried no usable payload
    #[error("{service} response contained no {missing}")]
    EmptyResponse {
        service: &'static str,
        missing: &'static str,
    },
}

impl ServiceError {
    pub fn transport(service: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { service, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let error = ServiceError::Status {
            service: "DeepL",
            status: StatusCode::FORBIDDEN,
            body: "invalid auth key".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("DeepL"));
        assert!(message.contains("403"));
        assert!(message.contains("invalid auth key"));
    }

    #[test]
    fn test_empty_response_display() {
        let error = ServiceError::EmptyResponse {
            service: "Azure OpenAI",
            missing: "choices",
        };

        let message = error.to_string();
        assert!(message.contains("Azure OpenAI"));
        assert!(message.contains("choices"));
    }
}
