//! Notification endpoints.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use tollgate_core::types::id::NotificationId;

use crate::error::ApiError;
use crate::extractors::CallerUserId;
use crate::state::AppState;

/// Body of a mark-seen request.
#[derive(Debug, Deserialize)]
pub struct MarkSeenRequest {
    /// Records to flip to seen.
    pub notification_ids: Vec<NotificationId>,
}

/// GET /api/notifications — latest notifications for the caller
pub async fn list_notifications(
    State(state): State<AppState>,
    CallerUserId(user_id): CallerUserId,
) -> Result<Json<Value>, ApiError> {
    let notifications = state.notification_service.recent(user_id).await?;
    Ok(Json(json!({ "notifications": notifications })))
}

/// GET /api/notifications/unread — unread count for the caller
pub async fn unread_count(
    State(state): State<AppState>,
    CallerUserId(user_id): CallerUserId,
) -> Result<Json<Value>, ApiError> {
    let count = state.notification_service.unread_count(user_id).await?;
    Ok(Json(json!({ "count": count })))
}

/// POST /api/notifications/seen — mark the caller's notifications seen
pub async fn mark_seen(
    State(state): State<AppState>,
    CallerUserId(user_id): CallerUserId,
    Json(body): Json<MarkSeenRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .realtime
        .dispatcher
        .mark_seen(&body.notification_ids, user_id)
        .await?;
    Ok(Json(json!({ "status": "ok" })))
}

/// DELETE /api/notifications — clear all of the caller's notifications
pub async fn clear_notifications(
    State(state): State<AppState>,
    CallerUserId(user_id): CallerUserId,
) -> Result<Json<Value>, ApiError> {
    let removed = state.notification_service.clear_all(user_id).await?;
    Ok(Json(
        json!({ "message": "Notifications cleared successfully", "removed": removed }),
    ))
}
