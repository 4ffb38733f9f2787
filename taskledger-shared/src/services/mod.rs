/// Lifecycle services
///
/// Each operation follows the same shape:
///
/// ```text
/// caller ─> resolve identity ─> role gate ─> validate request ─> store reads
///                                                              ─> at most one committed write
/// ```
///
/// Requests are explicit structs with optional fields; they are validated
/// before any store command is built.
///
/// # Modules
///
/// - `projects`: create/read/list/update/delete projects (Manager)
/// - `tasks`: task lifecycle, assignment and status updates
/// - `time_logs`: append-only time logging
/// - `login`: credential lookup

pub mod login;
pub mod projects;
pub mod tasks;
pub mod time_logs;

use std::sync::Arc;
use validator::Validate;

use crate::auth::{
    authorization::authorize,
    identity::{resolve_identity, Caller, Identity, UnknownIdentityPolicy},
};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{task::TaskStatus, user::Role};
use crate::store::EntityStore;

/// Dependencies shared by every service call
#[derive(Clone)]
pub struct ServiceContext {
    /// Entity store backend
    pub store: Arc<dyn EntityStore>,

    /// How unknown user IDs are treated
    pub identity_policy: UnknownIdentityPolicy,
}

impl ServiceContext {
    pub fn new(store: Arc<dyn EntityStore>, identity_policy: UnknownIdentityPolicy) -> Self {
        Self {
            store,
            identity_policy,
        }
    }

    /// Runs the role gate for `required`
    pub async fn authorize(&self, required: Role, caller: &Caller) -> ServiceResult<Identity> {
        Ok(authorize(self.store.as_ref(), required, caller, self.identity_policy).await?)
    }

    /// Resolves the caller without a role requirement
    pub async fn identify(&self, caller: &Caller) -> ServiceResult<Identity> {
        Ok(resolve_identity(self.store.as_ref(), caller, self.identity_policy).await?)
    }
}

/// Runs `validator` rules, flattening failures into one `InvalidInput`
pub(crate) fn validate_request<T: Validate>(request: &T) -> ServiceResult<()> {
    request.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();
        messages.sort();
        ServiceError::InvalidInput(messages.join("; "))
    })
}

/// Unwraps a required field
pub(crate) fn require_field<T>(value: Option<T>, field: &str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::invalid_input(format!("{} must be provided", field)))
}

/// Parses a status value against the fixed set
pub(crate) fn parse_status(raw: &str) -> ServiceResult<TaskStatus> {
    raw.parse::<TaskStatus>().map_err(ServiceError::InvalidStatus)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by the service tests

    use super::*;
    use crate::models::user::NewUser;
    use crate::models::UserId;
    use crate::store::memory::MemoryStore;

    pub struct Fixture {
        pub store: Arc<MemoryStore>,
        pub ctx: ServiceContext,
        pub manager: Caller,
        pub member: Caller,
        pub member_id: UserId,
        pub other_member: Caller,
        pub other_member_id: UserId,
    }

    async fn add_user(store: &MemoryStore, username: &str, role: Role) -> UserId {
        store
            .insert_user(NewUser {
                username: username.to_string(),
                password: "password123".to_string(),
                name: username.to_string(),
                role,
                email: format!("{}@example.com", username),
            })
            .await
            .unwrap()
    }

    pub async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let manager_id = add_user(&store, "manager1", Role::Manager).await;
        let member_id = add_user(&store, "team_member1", Role::TeamMember).await;
        let other_member_id = add_user(&store, "team_member2", Role::TeamMember).await;

        let ctx = ServiceContext::new(store.clone(), UnknownIdentityPolicy::Reject);

        Fixture {
            store,
            ctx,
            manager: Caller::user(manager_id),
            member: Caller::user(member_id),
            member_id,
            other_member: Caller::user(other_member_id),
            other_member_id,
        }
    }
}
