//! Storage error types.

/// Errors from the local key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("storage I/O error for {key}: {message}")]
    Io { key: String, message: String },

    /// Stored value could not be encoded or decoded
    #[error("stored {key} is not valid: {message}")]
    Corrupt { key: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StorageError::Io {
            key: "favorites".into(),
            message: "permission denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "storage I/O error for favorites: permission denied"
        );

        let err = StorageError::Corrupt {
            key: "auth".into(),
            message: "expected value at line 1 column 1".into(),
        };
        assert!(err.to_string().starts_with("stored auth is not valid"));
    }
}
