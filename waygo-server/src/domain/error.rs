//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. The
//! departure and favourites logic itself never fails; only inputs that
//! arrive from users (codes, coordinates) are rejected here.

use super::InvalidAtcoCode;

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A stop code failed validation
    #[error(transparent)]
    InvalidAtcoCode(#[from] InvalidAtcoCode),

    /// Latitude or longitude out of range
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AtcoCode;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidCoordinates("latitude 91 outside [-90, 90]".into());
        assert_eq!(
            err.to_string(),
            "invalid coordinates: latitude 91 outside [-90, 90]"
        );

        let err: DomainError = AtcoCode::parse("").unwrap_err().into();
        assert_eq!(err.to_string(), "invalid ATCO code: must not be empty");
    }
}
