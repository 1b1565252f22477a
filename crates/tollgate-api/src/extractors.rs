//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use tollgate_core::error::AppError;
use tollgate_core::types::id::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// Identifies the calling user from the `X-User-Id` header.
///
/// Session authentication lives in the excluded frontend layer; this
/// surface only needs to know which user a request is about.
#[derive(Debug, Clone, Copy)]
pub struct CallerUserId(pub UserId);

impl FromRequestParts<AppState> for CallerUserId {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError(AppError::validation("Missing X-User-Id header")))?;

        let user_id = raw
            .parse::<UserId>()
            .map_err(|_| ApiError(AppError::validation(format!("Invalid user id: '{raw}'"))))?;

        Ok(Self(user_id))
    }
}
