/// Identity resolution
///
/// Callers identify themselves with an opaque user ID taken verbatim from the
/// request (the `user_id` header). There is no cryptographic proof behind
/// it: the only check is that the ID parses and, depending on
/// [`UnknownIdentityPolicy`], that it denotes a provisioned user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use super::authorization::AuthzError;
use crate::models::{user::Role, UserId};
use crate::store::EntityStore;

/// What to do with a well-formed user ID that matches no user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownIdentityPolicy {
    /// Treat the caller as unauthenticated (401)
    #[default]
    Reject,

    /// Fall back to the Team Member role
    TeamMember,
}

impl UnknownIdentityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnknownIdentityPolicy::Reject => "reject",
            UnknownIdentityPolicy::TeamMember => "team_member",
        }
    }
}

impl fmt::Display for UnknownIdentityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnknownIdentityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(UnknownIdentityPolicy::Reject),
            "team_member" | "team-member" => Ok(UnknownIdentityPolicy::TeamMember),
            other => Err(format!(
                "Unknown identity policy '{}', expected 'reject' or 'team_member'",
                other
            )),
        }
    }
}

/// Caller-supplied identifier, as received
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    raw: Option<String>,
}

impl Caller {
    /// Caller that supplied no identifier
    pub fn anonymous() -> Self {
        Self { raw: None }
    }

    /// Caller identified by a raw header value
    pub fn from_header(value: Option<&str>) -> Self {
        Self {
            raw: value.map(str::to_string),
        }
    }

    /// Caller identified by a known user ID
    pub fn user(user_id: UserId) -> Self {
        Self {
            raw: Some(user_id.to_string()),
        }
    }

    /// Parses the identifier
    ///
    /// # Errors
    ///
    /// - `AuthzError::MissingIdentity` if nothing (or only whitespace) was supplied
    /// - `AuthzError::InvalidIdentity` if the value is not an integer ID
    pub fn user_id(&self) -> Result<UserId, AuthzError> {
        let raw = self
            .raw
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AuthzError::MissingIdentity)?;

        raw.parse::<UserId>()
            .map_err(|_| AuthzError::InvalidIdentity(raw.to_string()))
    }
}

/// A resolved caller: ID plus role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

/// Resolves a user ID to its role
///
/// Performs one store read. A missing user either fails with
/// `AuthzError::UnknownIdentity` or resolves to `Role::TeamMember`, depending
/// on `policy`.
pub async fn resolve_role(
    store: &dyn EntityStore,
    user_id: UserId,
    policy: UnknownIdentityPolicy,
) -> Result<Role, AuthzError> {
    match store.find_user_by_id(user_id).await? {
        Some(user) => {
            debug!(user_id, role = %user.role, "Resolved identity");
            Ok(user.role)
        }
        None => match policy {
            UnknownIdentityPolicy::Reject => Err(AuthzError::UnknownIdentity(user_id)),
            UnknownIdentityPolicy::TeamMember => {
                warn!(user_id, "Unknown user ID, falling back to Team Member");
                Ok(Role::TeamMember)
            }
        },
    }
}

/// Parses the caller and resolves it to an [`Identity`]
pub async fn resolve_identity(
    store: &dyn EntityStore,
    caller: &Caller,
    policy: UnknownIdentityPolicy,
) -> Result<Identity, AuthzError> {
    let user_id = caller.user_id()?;
    let role = resolve_role(store, user_id, policy).await?;
    Ok(Identity { user_id, role })
}
