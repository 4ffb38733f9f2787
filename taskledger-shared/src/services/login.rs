/// Credential lookup
///
/// Matches a username/password pair against the stored users. No session or
/// token is issued; callers identify themselves afterwards by user ID.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use super::{require_field, validate_request, ServiceContext};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{user::Role, UserId};

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255, message = "username must be 1-255 characters"))]
    pub username: Option<String>,

    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: Option<String>,
}

/// Successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub user_id: UserId,
    pub role: Role,
    pub name: String,
}

/// Looks up a user by exact credentials
pub async fn login(ctx: &ServiceContext, req: LoginRequest) -> ServiceResult<LoginOutcome> {
    validate_request(&req)?;

    let username = require_field(req.username, "username")?;
    let password = require_field(req.password, "password")?;

    let user = match ctx.store.find_user(&username, &password).await? {
        Some(user) => user,
        None => {
            warn!(username = %username, "Login failed");
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }
    };

    info!(user_id = user.user_id, role = %user.role, "User logged in");

    Ok(LoginOutcome {
        user_id: user.user_id,
        role: user.role,
        name: user.name,
    })
}
