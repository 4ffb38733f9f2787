/// Request extractors
///
/// - [`CallerId`]: the caller's `user_id` header, unparsed
/// - [`ApiJson`]: `axum::Json` whose rejections render as [`ApiError`]
/// - [`DeferredJson`]: an `ApiJson` whose rejection is held back until the
///   caller has been admitted

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use std::convert::Infallible;
use taskledger_shared::auth::identity::Caller;

use crate::error::ApiError;

/// Header carrying the caller's user ID
pub const USER_ID_HEADER: &str = "user_id";

/// Caller identity as sent by the client
///
/// Never rejects: a missing or non-UTF-8 header yields an anonymous caller,
/// which the role gate turns into 401.
#[derive(Debug, Clone)]
pub struct CallerId(pub Caller);

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        Ok(CallerId(Caller::from_header(raw)))
    }
}

/// JSON body extractor
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// JSON body whose decode failure is returned to the handler instead of
/// rejecting the request
///
/// Handlers behind a role gate take their body this way so that identity and
/// role errors win over body errors (see `routes::admit_body`).
pub type DeferredJson<T> = Result<ApiJson<T>, ApiError>;
