//! Route table.

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, location, notification, toll_plaza, ws};
use crate::state::AppState;

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/api/health", get(health::health))
        .route("/api/health/detailed", get(health::health_detailed))
        .route("/api/location", put(location::update_location))
        .route(
            "/api/notifications",
            get(notification::list_notifications).delete(notification::clear_notifications),
        )
        .route("/api/notifications/unread", get(notification::unread_count))
        .route("/api/notifications/seen", post(notification::mark_seen))
        .route("/api/toll-plazas", get(toll_plaza::list_plazas))
        .route("/api/toll-plazas/nearby", get(toll_plaza::nearby_plazas))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
