//! Auth API error types.

use super::validate::ValidationErrors;

/// Default message when the API rejects a request without saying why.
pub const GENERIC_FAILURE: &str = "Something went wrong, please try again.";

/// Errors from login and registration.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The submitted form failed validation; nothing was sent
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Login succeeded but carried no token
    #[error("login response has no token")]
    MissingToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_shows_api_message() {
        let err = AuthError::Rejected {
            status: 400,
            message: "Invalid credentials".into(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn error_display() {
        assert_eq!(
            AuthError::MissingToken.to_string(),
            "login response has no token"
        );
        let err = AuthError::Json {
            message: "missing field `id`".into(),
        };
        assert_eq!(err.to_string(), "JSON parse error: missing field `id`");
    }
}
