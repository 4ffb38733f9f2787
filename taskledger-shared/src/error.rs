/// Error taxonomy for lifecycle operations
///
/// Every service function returns [`ServiceResult`]. Each variant maps to one
/// outcome the caller can act on; none of them is retried and none is fatal
/// to the process.
///
/// | Variant | Meaning | HTTP |
/// |---|---|---|
/// | `Unauthorized` | no (valid) identifier supplied | 401 |
/// | `Forbidden` | wrong role, or not the task's assignee | 403 |
/// | `NotFound` | entity absent | 404 |
/// | `InvalidInput` | missing or malformed field | 400 |
/// | `InvalidStatus` | status outside the fixed set | 400 |
/// | `Store` | backend failure | 500 |

use crate::auth::authorization::AuthzError;
use crate::models::task::TaskStatus;
use crate::store::StoreError;

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by lifecycle operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Carries the rejected value
    #[error("Invalid status '{0}'. Allowed values are: {allowed}", allowed = TaskStatus::allowed_values())]
    InvalidStatus(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        ServiceError::NotFound(entity.to_string())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ServiceError::InvalidInput(message.into())
    }
}

impl From<AuthzError> for ServiceError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::Store(err) => ServiceError::Store(err),
            err if err.is_unauthenticated() => ServiceError::Unauthorized(err.to_string()),
            err => ServiceError::Forbidden(err.to_string()),
        }
    }
}
