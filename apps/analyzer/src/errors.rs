use thiserror::Error;

/// Shown when a submission is attempted with one or both slots empty.
pub const MISSING_FILES_MESSAGE: &str = "Please upload both resume and job description files";

/// Shown when the request never produced a response.
pub const FALLBACK_MESSAGE: &str = "Failed to analyze documents";

pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "The scoring service returned an analysis this client could not read";

/// Shown when the health check gets no response.
pub const HEALTH_UNREACHABLE_MESSAGE: &str = "Scoring service is unreachable";

/// Everything that can go wrong between picking files and rendering a result.
/// The UI layer only ever sees [`AnalyzerError::user_message`].
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The server answered with a non-2xx status.
    #[error("Server error (status {status}): {}", .message.as_deref().unwrap_or("<no error field>"))]
    Server { status: u16, message: Option<String> },

    /// No response at all: connect, DNS or TLS failure.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A selected file could not be read from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    pub fn missing_files() -> Self {
        AnalyzerError::Validation(MISSING_FILES_MESSAGE.to_string())
    }

    /// Collapses the error into the single banner string.
    ///
    /// Priority: the server's own `error` field, then a generic description
    /// of the failed request, then the fixed fallback.
    pub fn user_message(&self) -> String {
        match self {
            AnalyzerError::Validation(msg) => msg.clone(),
            AnalyzerError::Server {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            AnalyzerError::Server { status, .. } => {
                format!("Request failed with status code {status}")
            }
            AnalyzerError::Transport(_) => FALLBACK_MESSAGE.to_string(),
            AnalyzerError::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.to_string(),
            AnalyzerError::Io(e) => format!("Could not read file: {e}"),
        }
    }

    /// Banner text for a failed `GET /health`. The analysis fallback would
    /// blame document analysis, which the health check never attempts.
    pub fn health_message(&self) -> String {
        match self {
            AnalyzerError::Transport(_) => HEALTH_UNREACHABLE_MESSAGE.to_string(),
            AnalyzerError::Server { status, .. } => {
                format!("Scoring service is unhealthy (status {status})")
            }
            AnalyzerError::MalformedResponse(_) => {
                "Scoring service answered the health check with an unexpected body".to_string()
            }
            other => other.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_field_wins() {
        let err = AnalyzerError::Server {
            status: 400,
            message: Some("file too large".to_string()),
        };
        assert_eq!(err.user_message(), "file too large");
    }

    #[test]
    fn test_server_without_error_field_uses_generic_description() {
        let err = AnalyzerError::Server {
            status: 502,
            message: None,
        };
        assert_eq!(err.user_message(), "Request failed with status code 502");
    }

    #[test]
    fn test_blank_error_field_falls_through() {
        let err = AnalyzerError::Server {
            status: 500,
            message: Some("   ".to_string()),
        };
        assert_eq!(err.user_message(), "Request failed with status code 500");
    }

    #[test]
    fn test_missing_files_message() {
        assert_eq!(
            AnalyzerError::missing_files().user_message(),
            "Please upload both resume and job description files"
        );
    }

    #[test]
    fn test_malformed_response_has_its_own_message() {
        let err = AnalyzerError::MalformedResponse("missing field `score`".to_string());
        assert_eq!(err.user_message(), MALFORMED_RESPONSE_MESSAGE);
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_io_error_names_the_read_failure() {
        let err = AnalyzerError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "No such file or directory",
        ));
        assert_eq!(
            err.user_message(),
            "Could not read file: No such file or directory"
        );
    }

    #[test]
    fn test_health_message_does_not_mention_analysis() {
        let err = AnalyzerError::Server {
            status: 503,
            message: Some("maintenance".to_string()),
        };
        assert_eq!(err.health_message(), "Scoring service is unhealthy (status 503)");

        let err = AnalyzerError::MalformedResponse("expected value".to_string());
        assert!(!err.health_message().contains("analy"));
    }
}
