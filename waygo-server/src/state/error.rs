//! State container error types.

use crate::auth::AuthError;
use crate::storage::StorageError;

/// Errors from sign-in operations that also persist the session.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
