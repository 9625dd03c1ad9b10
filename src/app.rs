use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route("/api/entries/:id", delete(handlers::delete_entry))
        .route("/api/streak", get(handlers::get_streak))
        .route("/api/calendar", get(handlers::get_calendar))
        .route(
            "/api/notifications/permission",
            post(handlers::set_notification_permission),
        )
        .route("/api/reminder", get(handlers::take_reminder))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
