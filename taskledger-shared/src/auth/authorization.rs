/// Access control gate
///
/// Every role-restricted operation runs through [`authorize`] before it
/// touches any entity. The permission model is deliberately flat:
///
/// 1. **Identity**: the caller must supply a user ID (401 otherwise)
/// 2. **Role**: the resolved role must *equal* the required role; a Manager is
///    not admitted where a Team Member is required, and vice versa (403)
/// 3. **Assignment**: status changes and time logs additionally require the
///    caller to be the task's assignee ([`require_assignee`])
///
/// # Example
///
/// ```no_run
/// use taskledger_shared::auth::authorization::authorize;
/// use taskledger_shared::auth::identity::{Caller, UnknownIdentityPolicy};
/// use taskledger_shared::models::user::Role;
/// use taskledger_shared::store::EntityStore;
///
/// async fn check(store: &dyn EntityStore, caller: &Caller) -> Result<(), Box<dyn std::error::Error>> {
///     let identity = authorize(store, Role::Manager, caller, UnknownIdentityPolicy::Reject).await?;
///     println!("Manager {} admitted", identity.user_id);
///     Ok(())
/// }
/// ```

use tracing::debug;

use super::identity::{resolve_identity, Caller, Identity, UnknownIdentityPolicy};
use crate::models::{task::Task, user::Role, TaskId, UserId};
use crate::store::{EntityStore, StoreError};

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// No user ID was supplied
    #[error("User ID is missing")]
    MissingIdentity,

    /// The supplied user ID is malformed
    #[error("Invalid user ID: {0}")]
    InvalidIdentity(String),

    /// The user ID matches no user
    #[error("Unknown user ID: {0}")]
    UnknownIdentity(UserId),

    /// Resolved role differs from the required one
    #[error("{required} access required")]
    InsufficientRole { required: Role, actual: Role },

    /// Caller is not the task's assignee
    #[error("You are not assigned to task {0}")]
    NotAssignee(TaskId),

    /// Store error during identity resolution
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AuthzError {
    /// Whether this denial means "not authenticated" rather than "not allowed"
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthzError::MissingIdentity
                | AuthzError::InvalidIdentity(_)
                | AuthzError::UnknownIdentity(_)
        )
    }
}

/// Checks that a resolved role is exactly the required one
pub fn require_role(identity: &Identity, required: Role) -> Result<(), AuthzError> {
    if identity.role != required {
        return Err(AuthzError::InsufficientRole {
            required,
            actual: identity.role,
        });
    }

    Ok(())
}

/// Checks that the caller is the task's assignee
pub fn require_assignee(identity: &Identity, task: &Task) -> Result<(), AuthzError> {
    if !task.is_assigned_to(identity.user_id) {
        return Err(AuthzError::NotAssignee(task.task_id));
    }

    Ok(())
}

/// Admits or denies a caller for an operation restricted to `required`
///
/// Resolves the caller (one store read) and compares roles. No state is
/// retained between calls.
///
/// # Errors
///
/// - `MissingIdentity` / `InvalidIdentity` / `UnknownIdentity`: not authenticated
/// - `InsufficientRole`: authenticated with a different role
pub async fn authorize(
    store: &dyn EntityStore,
    required: Role,
    caller: &Caller,
    policy: UnknownIdentityPolicy,
) -> Result<Identity, AuthzError> {
    let identity = resolve_identity(store, caller, policy).await?;
    require_role(&identity, required)?;

    debug!(user_id = identity.user_id, role = %identity.role, "Caller admitted");
    Ok(identity)
}
