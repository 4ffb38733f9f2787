/// API route handlers
///
/// Handlers are thin: they pull the caller and the body out of the request,
/// call the matching service in `taskledger_shared::services`, and shape the
/// response.
///
/// Bodies of gated endpoints arrive as [`DeferredJson`]; [`admit_body`] makes
/// sure a caller who fails the gate hears about that, not about the body.
///
/// - `health`: welcome banner and health check
/// - `login`: credential check
/// - `projects`: project lifecycle
/// - `tasks`: task lifecycle, assignment and status
/// - `time_logs`: logging hours and reading them back

pub mod health;
pub mod login;
pub mod projects;
pub mod tasks;
pub mod time_logs;

use serde::{Deserialize, Serialize};
use taskledger_shared::{auth::identity::Caller, models::user::Role};

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{ApiJson, DeferredJson},
};

/// Admission rule of a gated endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gate {
    /// Caller must hold exactly this role
    Role(Role),

    /// Any resolved caller
    Identified,
}

/// Unwraps a deferred body
///
/// A decoded body passes straight through, since the service runs the same
/// gate before touching it. A body that failed to decode is reported only
/// after the caller has been admitted.
pub(crate) async fn admit_body<T>(
    state: &AppState,
    gate: Gate,
    caller: &Caller,
    body: DeferredJson<T>,
) -> ApiResult<T> {
    let rejection = match body {
        Ok(ApiJson(req)) => return Ok(req),
        Err(rejection) => rejection,
    };

    match gate {
        Gate::Role(role) => {
            state.services.authorize(role, caller).await?;
        }
        Gate::Identified => {
            state.services.identify(caller).await?;
        }
    }

    Err(rejection)
}

/// Body returned by mutations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,

    /// ID of the created row, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }

    pub fn with_id(message: impl Into<String>, id: i64) -> Self {
        Self {
            message: message.into(),
            id: Some(id),
        }
    }
}
