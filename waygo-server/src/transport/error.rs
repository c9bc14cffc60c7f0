//! Transit API error types.

/// Errors from the TransportAPI HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rejected app id or key
    #[error("unauthorized (check TRANSPORT_APP_ID and TRANSPORT_APP_KEY)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by TransportAPI")]
    RateLimited,

    /// Response parsed but carried no usable payload
    #[error("response has no {0}")]
    NoData(&'static str),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}
